// Constants for the declcheck front end

/// Size of the lexeme buffer, terminator slot included.
/// Lexemes may therefore hold at most `MAX_TOKEN_LENGTH - 1` characters.
pub const MAX_TOKEN_LENGTH: usize = 100;

/// Deepest nesting of `expr`, `term`, `factor` and `body` the parser accepts.
/// Bounds the recursion of parsing, printing and dropping a tree.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Line printed when every scheduled check passes
pub const SUCCESS_LINE: &str = "All systems go!";

/// Exit status after a fatal syntax error
pub const EXIT_SYNTAX_ERROR: i32 = 1;

/// Exit status when the input could not be read
pub const EXIT_IO_ERROR: i32 = 2;
