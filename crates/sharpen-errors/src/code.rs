use std::fmt;

/// How seriously a diagnostic should be taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

macro_rules! error_codes {
    ($($name:ident = $number:literal, $severity:ident, $message:literal;)*) => {
        /// Every diagnostic the front end can report.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ErrorCode {
            $($name,)*
        }

        impl ErrorCode {
            /// All codes, in declaration order.
            pub const ALL: &[ErrorCode] = &[$(ErrorCode::$name,)*];

            /// The `CSxxxx` identifier.
            pub const fn id(self) -> &'static str {
                match self {
                    $(ErrorCode::$name => concat!("CS", $number),)*
                }
            }

            pub const fn severity(self) -> Severity {
                match self {
                    $(ErrorCode::$name => Severity::$severity,)*
                }
            }

            /// Message template; `{0}`, `{1}` are replaced by diagnostic arguments.
            pub const fn template(self) -> &'static str {
                match self {
                    $(ErrorCode::$name => $message,)*
                }
            }
        }
    };
}

error_codes! {
    LowercaseEllSuffix = "0078", Warning, "The 'l' suffix is easily confused with the digit '1' -- use 'L' for clarity";
    FloatOverflow = "0594", Error, "Floating-point constant is outside the range of type '{0}'";
    IdentifierExpected = "1001", Error, "Identifier expected";
    SemicolonExpected = "1002", Error, "; expected";
    SyntaxError = "1003", Error, "Syntax error, '{0}' expected";
    IllegalEscape = "1009", Error, "Unrecognized escape sequence";
    NewlineInConst = "1010", Error, "Newline in constant";
    EmptyCharConst = "1011", Error, "Empty character literal";
    TooManyCharsInConst = "1012", Error, "Too many characters in character literal";
    IntOverflow = "1021", Error, "Integral constant is too large";
    EofExpected = "1022", Error, "Type or namespace definition, or end-of-file expected";
    PpDirectiveExpected = "1024", Error, "Preprocessor directive expected";
    EndOfPpLineExpected = "1025", Error, "Single-line comment or end-of-line expected";
    CloseParenExpected = "1026", Error, ") expected";
    EndifDirectiveExpected = "1027", Error, "#endif directive expected";
    UnexpectedDirective = "1028", Error, "Unexpected preprocessor directive";
    ErrorDirective = "1029", Error, "#error: '{0}'";
    WarningDirective = "1030", Warning, "#warning: '{0}'";
    TypeExpected = "1031", Error, "Type expected";
    PpDefFollowsToken = "1032", Error, "Cannot define/undefine preprocessor symbols after first token in file";
    OpenEndedComment = "1035", Error, "End-of-file found, '*/' expected";
    EndRegionDirectiveExpected = "1038", Error, "#endregion directive expected";
    UnterminatedStringLit = "1039", Error, "Unterminated string literal";
    BadDirectivePlacement = "1040", Error, "Preprocessor directives must appear as the first non-whitespace character on a line";
    IdentifierExpectedKw = "1041", Error, "Identifier expected; '{0}' is a keyword";
    UnexpectedCharacter = "1056", Error, "Unexpected character '{0}'";
    RbraceExpected = "1513", Error, "} expected";
    LbraceExpected = "1514", Error, "{ expected";
    InvalidPreprocExpr = "1517", Error, "Invalid preprocessor expression";
    InvalidMemberDecl = "1519", Error, "Invalid token '{0}' in class, record, struct, or interface member declaration";
    ExpectedEndTry = "1524", Error, "Expected catch or finally";
    InvalidExprTerm = "1525", Error, "Invalid expression term '{0}'";
    InvalidLineNumber = "1576", Error, "The line number specified for #line directive is missing or invalid";
    MissingPpFile = "1578", Error, "Quoted file name, single-line comment or end-of-line expected";
    IllegalPpWarning = "1634", Warning, "Expected 'disable' or 'restore'";
    UnclosedExpressionHole = "8076", Error, "Missing close delimiter '}' for interpolated expression started with '{'.";
    NullableDirectiveQualifierExpected = "8637", Error, "Expected 'enable', 'disable', or 'restore'";
}

impl ErrorCode {
    /// Renders the message template with `args`.
    pub fn format(self, args: &[impl AsRef<str>]) -> String {
        let mut message = self.template().to_owned();
        for (index, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg.as_ref());
        }
        message
    }

    pub fn is_warning(self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let mut numbers = ErrorCode::ALL.iter().map(|code| code.id()).collect::<Vec<_>>();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn display_and_format() {
        assert_eq!(ErrorCode::LowercaseEllSuffix.to_string(), "CS0078");
        assert_eq!(ErrorCode::SyntaxError.format(&[","]), "Syntax error, ',' expected");
        assert!(ErrorCode::WarningDirective.is_warning());
        assert!(!ErrorCode::ErrorDirective.is_warning());
    }
}
