/// Words retagged as `Keyword` when a name run matches exactly.
pub const KEYWORDS: &[&str] = &[
    "if", "elif", "else", "var", "let", "const", "mut", "return", "break", "yield", "continue",
    "case", "switch", "func", "def", "fun", "function", "define", "import", "for", "while", "type",
    "struct", "package", "nil", "false", "true", "none", "False", "True", "None", "Null", "null",
    "try", "catch", "except", "default",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}
