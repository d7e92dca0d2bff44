//! Common constants used throughout lmake.

/// Marker token identifying the root document of a project
pub const ROOT_MARKER: &str = "% !TeX root =";

/// Extension of LaTeX source files
pub const TEX_EXTENSION: &str = "tex";

/// Extension of compiled documents
pub const PDF_EXTENSION: &str = "pdf";

/// Root document name shipped by the template
pub const MAIN_TEX: &str = "main.tex";

/// Hidden template tree copied into every project
pub const TEMPLATE_FOLDER: &str = ".template";

/// Hidden editor settings folder copied into every project
pub const SETTINGS_FOLDER: &str = ".vscode";

/// Customization file inside the template tree
pub const CUSTOMIZATION_FILE: &str = "title.tex";

/// Scratch directory receiving the compiler output
pub const SCRATCH_DIR: &str = "temp";

/// Prefix of the directory created by the minted package
pub const MINTED_PREFIX: &str = "_minted-";

/// Environment variable naming the template base directory
pub const TEMPLATE_ENV: &str = "TEMPLATE";

/// Environment variable overriding the compiler command
pub const COMPILER_ENV: &str = "LMAKE_COMPILER";

pub const DEFAULT_COMPILER: &str = "pdflatex";
pub const DEFAULT_SOURCE_FOLDER: &str = "latex";
pub const DEFAULT_TEMPLATE_VERSION: &str = "t_school_v1";

/// Supported form defaults file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["lmake.json", "lmake.yml", "lmake.yaml"];
