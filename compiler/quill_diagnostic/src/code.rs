//! The closed set of diagnostic keys and their message catalog.

/// Stable diagnostic keys.
///
/// Each key has a snake_case name (used in rendered output, so messages stay
/// searchable across versions) and a canonical English message. The set is
/// closed: builders never invent ad-hoc keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DiagCode {
    // Syntax
    InvalidSyntax,
    InvalidType,
    InvalidExpr,
    MissingType,
    MissingExpr,
    MissingUsePath,
    MissingReceiver,
    MissingGotoLabel,
    MissingFunctionParentheses,
    BodyNotExist,
    DefNotSupportPub,
    AlreadyVariadic,
    AlreadyConst,
    MuchForeachVars,
    ExprNotFuncCall,
    ElseHaveExpr,

    // Lexical
    UnknownToken,
    UnterminatedString,
}

impl DiagCode {
    /// The stable snake_case key.
    pub fn key(self) -> &'static str {
        match self {
            DiagCode::InvalidSyntax => "invalid_syntax",
            DiagCode::InvalidType => "invalid_type",
            DiagCode::InvalidExpr => "invalid_expr",
            DiagCode::MissingType => "missing_type",
            DiagCode::MissingExpr => "missing_expr",
            DiagCode::MissingUsePath => "missing_use_path",
            DiagCode::MissingReceiver => "missing_receiver",
            DiagCode::MissingGotoLabel => "missing_goto_label",
            DiagCode::MissingFunctionParentheses => "missing_function_parentheses",
            DiagCode::BodyNotExist => "body_not_exist",
            DiagCode::DefNotSupportPub => "def_not_support_pub",
            DiagCode::AlreadyVariadic => "already_variadic",
            DiagCode::AlreadyConst => "already_const",
            DiagCode::MuchForeachVars => "much_foreach_vars",
            DiagCode::ExprNotFuncCall => "expr_not_func_call",
            DiagCode::ElseHaveExpr => "else_have_expr",
            DiagCode::UnknownToken => "unknown_token",
            DiagCode::UnterminatedString => "unterminated_string",
        }
    }

    /// The canonical message for this key.
    pub fn message(self) -> &'static str {
        match self {
            DiagCode::InvalidSyntax => "invalid syntax",
            DiagCode::InvalidType => "invalid data type",
            DiagCode::InvalidExpr => "invalid expression",
            DiagCode::MissingType => "missing type annotation",
            DiagCode::MissingExpr => "missing expression",
            DiagCode::MissingUsePath => "missing path for use declaration",
            DiagCode::MissingReceiver => "method is missing its receiver parameter",
            DiagCode::MissingGotoLabel => "goto statement is missing its label",
            DiagCode::MissingFunctionParentheses => "missing function parentheses",
            DiagCode::BodyNotExist => "definition is missing its body",
            DiagCode::DefNotSupportPub => "definition does not support the public modifier",
            DiagCode::AlreadyVariadic => "parameter is already variadic",
            DiagCode::AlreadyConst => "definition is already constant",
            DiagCode::MuchForeachVars => "too many variables for iteration",
            DiagCode::ExprNotFuncCall => "expression is not a function call",
            DiagCode::ElseHaveExpr => "else block does not accept an expression",
            DiagCode::UnknownToken => "unrecognized token",
            DiagCode::UnterminatedString => "string literal is not terminated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_snake_case() {
        let codes = [
            DiagCode::InvalidSyntax,
            DiagCode::MissingType,
            DiagCode::DefNotSupportPub,
            DiagCode::MuchForeachVars,
            DiagCode::UnterminatedString,
        ];
        for code in codes {
            let key = code.key();
            assert!(!key.is_empty());
            assert!(key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_' || c.is_ascii_digit()));
        }
    }

    #[test]
    fn every_key_has_a_message() {
        assert_eq!(DiagCode::BodyNotExist.message(), "definition is missing its body");
        assert_eq!(DiagCode::ElseHaveExpr.key(), "else_have_expr");
    }
}
