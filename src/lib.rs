/*!
 * # smi2ass - SAMI to Advanced SubStation Alpha subtitle styling
 *
 * A Rust library that builds the header of an `.ass` subtitle file from two
 * JSON setting files, for use by an SMI→ASS converter.
 *
 * ## Features
 *
 * - Compose the `[Script Info]` and `[V4+ Styles]` blocks from `ass_styles.json`,
 *   keeping the key order of the file
 * - Override title, playback resolution, font name and font size per conversion
 * - Map SMI language classes to ASS language codes via `lan_code.json`,
 *   with an `UNKNOWNCC` fallback
 * - Convert CSS color names to `#rrggbb` and to ASS `&HBBGGRR&`
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `ass_style`: `StyleComposer` and the ordered style table
 * - `language_utils`: SMI→ASS language table and ISO 639 checks
 * - `color`: CSS color-name table and ASS color notation
 * - `app_config`: Setting directory resolution and shared settings
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod ass_style;
pub mod color;
pub mod errors;
pub mod file_utils;
pub mod language_utils;

// Re-export main types for easier usage
pub use ass_style::{StyleComposer, StyleTable};
pub use color::color_name_to_hex;
pub use errors::{AppError, ColorError, ConfigError};
pub use language_utils::LanguageTable;
