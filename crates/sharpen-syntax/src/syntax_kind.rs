//! The closed set of token, trivia and node kinds.
//!
//! Variants are grouped so that every category is a contiguous range; the
//! classification helpers below rely on that ordering.

use SyntaxKind::*;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    TOMBSTONE,
    /// Internal container for list children.
    LIST,
    /// Internal container for element/separator alternations.
    SEPARATED_LIST,

    // punctuation
    TILDE,
    EXCLAMATION,
    PERCENT,
    CARET,
    AMPERSAND,
    ASTERISK,
    OPEN_PAREN,
    CLOSE_PAREN,
    MINUS,
    PLUS,
    EQUALS,
    OPEN_BRACE,
    CLOSE_BRACE,
    OPEN_BRACKET,
    CLOSE_BRACKET,
    BAR,
    COLON,
    SEMICOLON,
    DOUBLE_QUOTE,
    SINGLE_QUOTE,
    LESS_THAN,
    COMMA,
    GREATER_THAN,
    DOT,
    QUESTION,
    HASH,
    SLASH,
    DOT_DOT,
    SLASH_GREATER_THAN,
    LESS_THAN_SLASH,
    BAR_BAR,
    AMPERSAND_AMPERSAND,
    MINUS_MINUS,
    PLUS_PLUS,
    COLON_COLON,
    QUESTION_QUESTION,
    MINUS_GREATER_THAN,
    EXCLAMATION_EQUALS,
    EQUALS_EQUALS,
    EQUALS_GREATER_THAN,
    LESS_THAN_EQUALS,
    LESS_THAN_LESS_THAN,
    LESS_THAN_LESS_THAN_EQUALS,
    GREATER_THAN_EQUALS,
    GREATER_THAN_GREATER_THAN,
    GREATER_THAN_GREATER_THAN_EQUALS,
    GREATER_THAN_GREATER_THAN_GREATER_THAN,
    GREATER_THAN_GREATER_THAN_GREATER_THAN_EQUALS,
    SLASH_EQUALS,
    ASTERISK_EQUALS,
    BAR_EQUALS,
    AMPERSAND_EQUALS,
    PLUS_EQUALS,
    MINUS_EQUALS,
    CARET_EQUALS,
    PERCENT_EQUALS,
    QUESTION_QUESTION_EQUALS,

    // reserved keywords
    BOOL_KW,
    BYTE_KW,
    SBYTE_KW,
    SHORT_KW,
    USHORT_KW,
    INT_KW,
    UINT_KW,
    LONG_KW,
    ULONG_KW,
    DOUBLE_KW,
    FLOAT_KW,
    DECIMAL_KW,
    STRING_KW,
    CHAR_KW,
    VOID_KW,
    OBJECT_KW,
    TYPEOF_KW,
    SIZEOF_KW,
    NULL_KW,
    TRUE_KW,
    FALSE_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    FOR_KW,
    FOREACH_KW,
    DO_KW,
    SWITCH_KW,
    CASE_KW,
    DEFAULT_KW,
    TRY_KW,
    CATCH_KW,
    FINALLY_KW,
    LOCK_KW,
    GOTO_KW,
    BREAK_KW,
    CONTINUE_KW,
    RETURN_KW,
    THROW_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    INTERNAL_KW,
    PROTECTED_KW,
    STATIC_KW,
    READONLY_KW,
    SEALED_KW,
    CONST_KW,
    FIXED_KW,
    STACKALLOC_KW,
    VOLATILE_KW,
    NEW_KW,
    OVERRIDE_KW,
    ABSTRACT_KW,
    VIRTUAL_KW,
    EVENT_KW,
    EXTERN_KW,
    REF_KW,
    OUT_KW,
    IN_KW,
    IS_KW,
    AS_KW,
    PARAMS_KW,
    THIS_KW,
    BASE_KW,
    NAMESPACE_KW,
    USING_KW,
    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ENUM_KW,
    DELEGATE_KW,
    CHECKED_KW,
    UNCHECKED_KW,
    UNSAFE_KW,
    OPERATOR_KW,
    EXPLICIT_KW,
    IMPLICIT_KW,

    // contextual keywords
    YIELD_KW,
    PARTIAL_KW,
    ALIAS_KW,
    GLOBAL_KW,
    GET_KW,
    SET_KW,
    INIT_KW,
    ADD_KW,
    REMOVE_KW,
    WHERE_KW,
    ASYNC_KW,
    AWAIT_KW,
    WHEN_KW,
    RECORD_KW,
    WITH_KW,
    REQUIRED_KW,
    FILE_KW,

    // preprocessor keywords
    ELIF_KW,
    ENDIF_KW,
    REGION_KW,
    ENDREGION_KW,
    DEFINE_KW,
    UNDEF_KW,
    WARNING_KW,
    ERROR_KW,
    LINE_KW,
    PRAGMA_KW,
    HIDDEN_KW,
    NULLABLE_KW,
    ENABLE_KW,
    DISABLE_KW,
    RESTORE_KW,
    WARNINGS_KW,
    ANNOTATIONS_KW,

    // tokens with variable text
    IDENTIFIER,
    NUMERIC_LITERAL,
    CHARACTER_LITERAL,
    STRING_LITERAL,
    INTERPOLATED_STRING_START,
    INTERPOLATED_VERBATIM_STRING_START,
    INTERPOLATED_STRING_TEXT_TOKEN,
    INTERPOLATED_STRING_END,
    XML_TEXT_LITERAL,
    XML_TEXT_LITERAL_NEW_LINE,
    BAD_TOKEN,
    END_OF_DIRECTIVE,
    END_OF_DOCUMENTATION_COMMENT,
    END_OF_FILE,

    // simple trivia
    WHITESPACE,
    END_OF_LINE,
    SINGLE_LINE_COMMENT,
    MULTI_LINE_COMMENT,
    DOCUMENTATION_COMMENT_EXTERIOR,
    DISABLED_TEXT,
    PREPROCESSING_MESSAGE,

    // structured trivia
    SKIPPED_TOKENS_TRIVIA,
    SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA,
    IF_DIRECTIVE_TRIVIA,
    ELIF_DIRECTIVE_TRIVIA,
    ELSE_DIRECTIVE_TRIVIA,
    END_IF_DIRECTIVE_TRIVIA,
    REGION_DIRECTIVE_TRIVIA,
    END_REGION_DIRECTIVE_TRIVIA,
    DEFINE_DIRECTIVE_TRIVIA,
    UNDEF_DIRECTIVE_TRIVIA,
    ERROR_DIRECTIVE_TRIVIA,
    WARNING_DIRECTIVE_TRIVIA,
    LINE_DIRECTIVE_TRIVIA,
    PRAGMA_WARNING_DIRECTIVE_TRIVIA,
    NULLABLE_DIRECTIVE_TRIVIA,
    BAD_DIRECTIVE_TRIVIA,

    // names and types
    IDENTIFIER_NAME,
    GENERIC_NAME,
    TYPE_ARGUMENT_LIST,
    QUALIFIED_NAME,
    ALIAS_QUALIFIED_NAME,
    PREDEFINED_TYPE,
    ARRAY_TYPE,
    ARRAY_RANK_SPECIFIER,
    OMITTED_ARRAY_SIZE_EXPRESSION,
    OMITTED_TYPE_ARGUMENT,
    POINTER_TYPE,
    NULLABLE_TYPE,
    TUPLE_TYPE,
    TUPLE_ELEMENT,
    FUNCTION_POINTER_TYPE,
    FUNCTION_POINTER_PARAMETER_LIST,
    FUNCTION_POINTER_PARAMETER,

    // expressions
    PARENTHESIZED_EXPRESSION,
    TUPLE_EXPRESSION,
    CONDITIONAL_EXPRESSION,
    CAST_EXPRESSION,
    ADD_EXPRESSION,
    SUBTRACT_EXPRESSION,
    MULTIPLY_EXPRESSION,
    DIVIDE_EXPRESSION,
    MODULO_EXPRESSION,
    LEFT_SHIFT_EXPRESSION,
    RIGHT_SHIFT_EXPRESSION,
    UNSIGNED_RIGHT_SHIFT_EXPRESSION,
    LOGICAL_OR_EXPRESSION,
    LOGICAL_AND_EXPRESSION,
    BITWISE_OR_EXPRESSION,
    BITWISE_AND_EXPRESSION,
    EXCLUSIVE_OR_EXPRESSION,
    EQUALS_EXPRESSION,
    NOT_EQUALS_EXPRESSION,
    LESS_THAN_EXPRESSION,
    LESS_THAN_OR_EQUAL_EXPRESSION,
    GREATER_THAN_EXPRESSION,
    GREATER_THAN_OR_EQUAL_EXPRESSION,
    IS_EXPRESSION,
    AS_EXPRESSION,
    COALESCE_EXPRESSION,
    SIMPLE_ASSIGNMENT_EXPRESSION,
    ADD_ASSIGNMENT_EXPRESSION,
    SUBTRACT_ASSIGNMENT_EXPRESSION,
    MULTIPLY_ASSIGNMENT_EXPRESSION,
    DIVIDE_ASSIGNMENT_EXPRESSION,
    MODULO_ASSIGNMENT_EXPRESSION,
    AND_ASSIGNMENT_EXPRESSION,
    EXCLUSIVE_OR_ASSIGNMENT_EXPRESSION,
    OR_ASSIGNMENT_EXPRESSION,
    LEFT_SHIFT_ASSIGNMENT_EXPRESSION,
    RIGHT_SHIFT_ASSIGNMENT_EXPRESSION,
    UNSIGNED_RIGHT_SHIFT_ASSIGNMENT_EXPRESSION,
    COALESCE_ASSIGNMENT_EXPRESSION,
    UNARY_PLUS_EXPRESSION,
    UNARY_MINUS_EXPRESSION,
    BITWISE_NOT_EXPRESSION,
    LOGICAL_NOT_EXPRESSION,
    PRE_INCREMENT_EXPRESSION,
    PRE_DECREMENT_EXPRESSION,
    ADDRESS_OF_EXPRESSION,
    POINTER_INDIRECTION_EXPRESSION,
    INDEX_EXPRESSION,
    AWAIT_EXPRESSION,
    POST_INCREMENT_EXPRESSION,
    POST_DECREMENT_EXPRESSION,
    SUPPRESS_NULLABLE_WARNING_EXPRESSION,
    RANGE_EXPRESSION,
    SIMPLE_MEMBER_ACCESS_EXPRESSION,
    POINTER_MEMBER_ACCESS_EXPRESSION,
    CONDITIONAL_ACCESS_EXPRESSION,
    MEMBER_BINDING_EXPRESSION,
    ELEMENT_BINDING_EXPRESSION,
    INVOCATION_EXPRESSION,
    ELEMENT_ACCESS_EXPRESSION,
    NUMERIC_LITERAL_EXPRESSION,
    STRING_LITERAL_EXPRESSION,
    CHARACTER_LITERAL_EXPRESSION,
    TRUE_LITERAL_EXPRESSION,
    FALSE_LITERAL_EXPRESSION,
    NULL_LITERAL_EXPRESSION,
    DEFAULT_LITERAL_EXPRESSION,
    THIS_EXPRESSION,
    BASE_EXPRESSION,
    TYPEOF_EXPRESSION,
    SIZEOF_EXPRESSION,
    DEFAULT_EXPRESSION,
    CHECKED_EXPRESSION,
    UNCHECKED_EXPRESSION,
    OBJECT_CREATION_EXPRESSION,
    IMPLICIT_OBJECT_CREATION_EXPRESSION,
    ANONYMOUS_OBJECT_CREATION_EXPRESSION,
    ARRAY_CREATION_EXPRESSION,
    IMPLICIT_ARRAY_CREATION_EXPRESSION,
    STACK_ALLOC_ARRAY_CREATION_EXPRESSION,
    OBJECT_INITIALIZER_EXPRESSION,
    COLLECTION_INITIALIZER_EXPRESSION,
    ARRAY_INITIALIZER_EXPRESSION,
    COMPLEX_ELEMENT_INITIALIZER_EXPRESSION,
    WITH_INITIALIZER_EXPRESSION,
    WITH_EXPRESSION,
    SIMPLE_LAMBDA_EXPRESSION,
    PARENTHESIZED_LAMBDA_EXPRESSION,
    ANONYMOUS_METHOD_EXPRESSION,
    INTERPOLATED_STRING_EXPRESSION,
    DECLARATION_EXPRESSION,
    IS_PATTERN_EXPRESSION,
    THROW_EXPRESSION,

    // expression parts
    ARGUMENT_LIST,
    BRACKETED_ARGUMENT_LIST,
    ARGUMENT,
    NAME_COLON,
    NAME_EQUALS,
    ANONYMOUS_OBJECT_MEMBER_DECLARATOR,
    INTERPOLATED_STRING_TEXT,
    INTERPOLATION,
    INTERPOLATION_ALIGNMENT_CLAUSE,
    INTERPOLATION_FORMAT_CLAUSE,
    SINGLE_VARIABLE_DESIGNATION,
    DECLARATION_PATTERN,
    CONSTANT_PATTERN,

    // statements
    BLOCK,
    LOCAL_DECLARATION_STATEMENT,
    LOCAL_FUNCTION_STATEMENT,
    EXPRESSION_STATEMENT,
    EMPTY_STATEMENT,
    LABELED_STATEMENT,
    GOTO_STATEMENT,
    GOTO_CASE_STATEMENT,
    GOTO_DEFAULT_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    RETURN_STATEMENT,
    THROW_STATEMENT,
    YIELD_RETURN_STATEMENT,
    YIELD_BREAK_STATEMENT,
    WHILE_STATEMENT,
    DO_STATEMENT,
    FOR_STATEMENT,
    FOREACH_STATEMENT,
    USING_STATEMENT,
    FIXED_STATEMENT,
    CHECKED_STATEMENT,
    UNCHECKED_STATEMENT,
    UNSAFE_STATEMENT,
    LOCK_STATEMENT,
    IF_STATEMENT,
    SWITCH_STATEMENT,
    TRY_STATEMENT,

    // statement parts
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    EQUALS_VALUE_CLAUSE,
    ELSE_CLAUSE,
    SWITCH_SECTION,
    CASE_SWITCH_LABEL,
    DEFAULT_SWITCH_LABEL,
    CATCH_CLAUSE,
    CATCH_DECLARATION,
    CATCH_FILTER_CLAUSE,
    FINALLY_CLAUSE,

    // declarations
    COMPILATION_UNIT,
    EXTERN_ALIAS_DIRECTIVE,
    USING_DIRECTIVE,
    ATTRIBUTE_LIST,
    ATTRIBUTE_TARGET_SPECIFIER,
    ATTRIBUTE,
    ATTRIBUTE_ARGUMENT_LIST,
    ATTRIBUTE_ARGUMENT,
    NAMESPACE_DECLARATION,
    FILE_SCOPED_NAMESPACE_DECLARATION,
    CLASS_DECLARATION,
    STRUCT_DECLARATION,
    INTERFACE_DECLARATION,
    RECORD_DECLARATION,
    RECORD_STRUCT_DECLARATION,
    ENUM_DECLARATION,
    DELEGATE_DECLARATION,
    ENUM_MEMBER_DECLARATION,
    FIELD_DECLARATION,
    EVENT_FIELD_DECLARATION,
    METHOD_DECLARATION,
    OPERATOR_DECLARATION,
    CONVERSION_OPERATOR_DECLARATION,
    CONSTRUCTOR_DECLARATION,
    DESTRUCTOR_DECLARATION,
    PROPERTY_DECLARATION,
    EVENT_DECLARATION,
    INDEXER_DECLARATION,
    INCOMPLETE_MEMBER,

    // declaration parts
    BASE_LIST,
    SIMPLE_BASE_TYPE,
    PRIMARY_CONSTRUCTOR_BASE_TYPE,
    TYPE_PARAMETER_LIST,
    TYPE_PARAMETER,
    TYPE_PARAMETER_CONSTRAINT_CLAUSE,
    TYPE_CONSTRAINT,
    CLASS_CONSTRAINT,
    STRUCT_CONSTRAINT,
    CONSTRUCTOR_CONSTRAINT,
    EXPLICIT_INTERFACE_SPECIFIER,
    ACCESSOR_LIST,
    GET_ACCESSOR_DECLARATION,
    SET_ACCESSOR_DECLARATION,
    INIT_ACCESSOR_DECLARATION,
    ADD_ACCESSOR_DECLARATION,
    REMOVE_ACCESSOR_DECLARATION,
    UNKNOWN_ACCESSOR_DECLARATION,
    ARROW_EXPRESSION_CLAUSE,
    BASE_CONSTRUCTOR_INITIALIZER,
    THIS_CONSTRUCTOR_INITIALIZER,
    PARAMETER_LIST,
    BRACKETED_PARAMETER_LIST,
    PARAMETER,

    // documentation comments
    XML_ELEMENT,
    XML_ELEMENT_START_TAG,
    XML_ELEMENT_END_TAG,
    XML_EMPTY_ELEMENT,
    XML_NAME,
    XML_TEXT_ATTRIBUTE,
    XML_TEXT,
}

const fn in_range(kind: SyntaxKind, first: SyntaxKind, last: SyntaxKind) -> bool {
    let kind = kind as u16;
    kind >= first as u16 && kind <= last as u16
}

impl SyntaxKind {
    /// Number of kinds; used to size `SyntaxSet`.
    pub const COUNT: usize = XML_TEXT as usize + 1;

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        in_range(self, TILDE, QUESTION_QUESTION_EQUALS)
    }

    #[inline]
    pub const fn is_reserved_keyword(self) -> bool {
        in_range(self, BOOL_KW, IMPLICIT_KW)
    }

    #[inline]
    pub const fn is_contextual_keyword(self) -> bool {
        in_range(self, YIELD_KW, FILE_KW)
    }

    #[inline]
    pub const fn is_preprocessor_keyword(self) -> bool {
        in_range(self, ELIF_KW, ANNOTATIONS_KW)
    }

    /// Any keyword kind, reserved, contextual or preprocessor.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        in_range(self, BOOL_KW, ANNOTATIONS_KW)
    }

    /// `true` for every kind a token may carry.
    #[inline]
    pub const fn is_token(self) -> bool {
        in_range(self, TILDE, END_OF_FILE)
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        in_range(self, WHITESPACE, BAD_DIRECTIVE_TRIVIA)
    }

    #[inline]
    pub const fn is_structured_trivia(self) -> bool {
        in_range(self, SKIPPED_TOKENS_TRIVIA, BAD_DIRECTIVE_TRIVIA)
    }

    #[inline]
    pub const fn is_directive(self) -> bool {
        in_range(self, IF_DIRECTIVE_TRIVIA, BAD_DIRECTIVE_TRIVIA)
    }

    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, SINGLE_LINE_COMMENT | MULTI_LINE_COMMENT)
    }

    #[inline]
    pub const fn is_node(self) -> bool {
        self.is_structured_trivia() || in_range(self, IDENTIFIER_NAME, XML_TEXT)
    }

    #[inline]
    pub const fn is_list(self) -> bool {
        matches!(self, LIST | SEPARATED_LIST)
    }

    #[inline]
    pub const fn is_name(self) -> bool {
        matches!(self, IDENTIFIER_NAME | GENERIC_NAME | QUALIFIED_NAME | ALIAS_QUALIFIED_NAME)
    }

    #[inline]
    pub const fn is_type(self) -> bool {
        in_range(self, IDENTIFIER_NAME, FUNCTION_POINTER_PARAMETER)
            && !matches!(
                self,
                TYPE_ARGUMENT_LIST
                    | ARRAY_RANK_SPECIFIER
                    | OMITTED_ARRAY_SIZE_EXPRESSION
                    | TUPLE_ELEMENT
                    | FUNCTION_POINTER_PARAMETER_LIST
                    | FUNCTION_POINTER_PARAMETER
            )
    }

    #[inline]
    pub const fn is_expression(self) -> bool {
        self.is_type() || self.is_name() || in_range(self, PARENTHESIZED_EXPRESSION, THROW_EXPRESSION)
    }

    #[inline]
    pub const fn is_binary_expression(self) -> bool {
        in_range(self, ADD_EXPRESSION, COALESCE_EXPRESSION)
    }

    #[inline]
    pub const fn is_assignment_expression(self) -> bool {
        in_range(self, SIMPLE_ASSIGNMENT_EXPRESSION, COALESCE_ASSIGNMENT_EXPRESSION)
    }

    #[inline]
    pub const fn is_prefix_unary_expression(self) -> bool {
        in_range(self, UNARY_PLUS_EXPRESSION, INDEX_EXPRESSION)
    }

    #[inline]
    pub const fn is_postfix_unary_expression(self) -> bool {
        in_range(self, POST_INCREMENT_EXPRESSION, SUPPRESS_NULLABLE_WARNING_EXPRESSION)
    }

    #[inline]
    pub const fn is_literal_expression(self) -> bool {
        in_range(self, NUMERIC_LITERAL_EXPRESSION, DEFAULT_LITERAL_EXPRESSION)
    }

    #[inline]
    pub const fn is_initializer_expression(self) -> bool {
        in_range(self, OBJECT_INITIALIZER_EXPRESSION, WITH_INITIALIZER_EXPRESSION)
    }

    #[inline]
    pub const fn is_lambda_expression(self) -> bool {
        matches!(
            self,
            SIMPLE_LAMBDA_EXPRESSION | PARENTHESIZED_LAMBDA_EXPRESSION | ANONYMOUS_METHOD_EXPRESSION
        )
    }

    #[inline]
    pub const fn is_statement(self) -> bool {
        in_range(self, BLOCK, TRY_STATEMENT)
    }

    #[inline]
    pub const fn is_type_declaration(self) -> bool {
        in_range(self, CLASS_DECLARATION, ENUM_DECLARATION)
    }

    /// Namespace, type and member declarations.
    #[inline]
    pub const fn is_member_declaration(self) -> bool {
        in_range(self, NAMESPACE_DECLARATION, INCOMPLETE_MEMBER) && !matches!(self, ENUM_MEMBER_DECLARATION)
    }

    #[inline]
    pub const fn is_accessor_declaration(self) -> bool {
        in_range(self, GET_ACCESSOR_DECLARATION, UNKNOWN_ACCESSOR_DECLARATION)
    }

    #[inline]
    pub const fn is_xml_node(self) -> bool {
        in_range(self, XML_ELEMENT, XML_TEXT)
    }

    /// Tokens whose text is not implied by their kind and must come from a
    /// dedicated factory.
    #[inline]
    pub const fn has_variable_text(self) -> bool {
        in_range(self, IDENTIFIER, BAD_TOKEN)
    }

    #[inline]
    pub const fn is_literal_token(self) -> bool {
        matches!(self, NUMERIC_LITERAL | CHARACTER_LITERAL | STRING_LITERAL)
    }

    #[inline]
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            PUBLIC_KW
                | PRIVATE_KW
                | INTERNAL_KW
                | PROTECTED_KW
                | STATIC_KW
                | READONLY_KW
                | SEALED_KW
                | CONST_KW
                | FIXED_KW
                | VOLATILE_KW
                | NEW_KW
                | OVERRIDE_KW
                | ABSTRACT_KW
                | VIRTUAL_KW
                | EXTERN_KW
                | UNSAFE_KW
                | PARTIAL_KW
                | ASYNC_KW
                | REQUIRED_KW
                | FILE_KW
                | REF_KW
        )
    }

    #[inline]
    pub const fn is_predefined_type(self) -> bool {
        in_range(self, BOOL_KW, OBJECT_KW)
    }

    /// The text every token of this kind carries, if fixed.
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            TILDE => "~",
            EXCLAMATION => "!",
            PERCENT => "%",
            CARET => "^",
            AMPERSAND => "&",
            ASTERISK => "*",
            OPEN_PAREN => "(",
            CLOSE_PAREN => ")",
            MINUS => "-",
            PLUS => "+",
            EQUALS => "=",
            OPEN_BRACE => "{",
            CLOSE_BRACE => "}",
            OPEN_BRACKET => "[",
            CLOSE_BRACKET => "]",
            BAR => "|",
            COLON => ":",
            SEMICOLON => ";",
            DOUBLE_QUOTE => "\"",
            SINGLE_QUOTE => "'",
            LESS_THAN => "<",
            COMMA => ",",
            GREATER_THAN => ">",
            DOT => ".",
            QUESTION => "?",
            HASH => "#",
            SLASH => "/",
            DOT_DOT => "..",
            SLASH_GREATER_THAN => "/>",
            LESS_THAN_SLASH => "</",
            BAR_BAR => "||",
            AMPERSAND_AMPERSAND => "&&",
            MINUS_MINUS => "--",
            PLUS_PLUS => "++",
            COLON_COLON => "::",
            QUESTION_QUESTION => "??",
            MINUS_GREATER_THAN => "->",
            EXCLAMATION_EQUALS => "!=",
            EQUALS_EQUALS => "==",
            EQUALS_GREATER_THAN => "=>",
            LESS_THAN_EQUALS => "<=",
            LESS_THAN_LESS_THAN => "<<",
            LESS_THAN_LESS_THAN_EQUALS => "<<=",
            GREATER_THAN_EQUALS => ">=",
            GREATER_THAN_GREATER_THAN => ">>",
            GREATER_THAN_GREATER_THAN_EQUALS => ">>=",
            GREATER_THAN_GREATER_THAN_GREATER_THAN => ">>>",
            GREATER_THAN_GREATER_THAN_GREATER_THAN_EQUALS => ">>>=",
            SLASH_EQUALS => "/=",
            ASTERISK_EQUALS => "*=",
            BAR_EQUALS => "|=",
            AMPERSAND_EQUALS => "&=",
            PLUS_EQUALS => "+=",
            MINUS_EQUALS => "-=",
            CARET_EQUALS => "^=",
            PERCENT_EQUALS => "%=",
            QUESTION_QUESTION_EQUALS => "??=",
            BOOL_KW => "bool",
            BYTE_KW => "byte",
            SBYTE_KW => "sbyte",
            SHORT_KW => "short",
            USHORT_KW => "ushort",
            INT_KW => "int",
            UINT_KW => "uint",
            LONG_KW => "long",
            ULONG_KW => "ulong",
            DOUBLE_KW => "double",
            FLOAT_KW => "float",
            DECIMAL_KW => "decimal",
            STRING_KW => "string",
            CHAR_KW => "char",
            VOID_KW => "void",
            OBJECT_KW => "object",
            TYPEOF_KW => "typeof",
            SIZEOF_KW => "sizeof",
            NULL_KW => "null",
            TRUE_KW => "true",
            FALSE_KW => "false",
            IF_KW => "if",
            ELSE_KW => "else",
            WHILE_KW => "while",
            FOR_KW => "for",
            FOREACH_KW => "foreach",
            DO_KW => "do",
            SWITCH_KW => "switch",
            CASE_KW => "case",
            DEFAULT_KW => "default",
            TRY_KW => "try",
            CATCH_KW => "catch",
            FINALLY_KW => "finally",
            LOCK_KW => "lock",
            GOTO_KW => "goto",
            BREAK_KW => "break",
            CONTINUE_KW => "continue",
            RETURN_KW => "return",
            THROW_KW => "throw",
            PUBLIC_KW => "public",
            PRIVATE_KW => "private",
            INTERNAL_KW => "internal",
            PROTECTED_KW => "protected",
            STATIC_KW => "static",
            READONLY_KW => "readonly",
            SEALED_KW => "sealed",
            CONST_KW => "const",
            FIXED_KW => "fixed",
            STACKALLOC_KW => "stackalloc",
            VOLATILE_KW => "volatile",
            NEW_KW => "new",
            OVERRIDE_KW => "override",
            ABSTRACT_KW => "abstract",
            VIRTUAL_KW => "virtual",
            EVENT_KW => "event",
            EXTERN_KW => "extern",
            REF_KW => "ref",
            OUT_KW => "out",
            IN_KW => "in",
            IS_KW => "is",
            AS_KW => "as",
            PARAMS_KW => "params",
            THIS_KW => "this",
            BASE_KW => "base",
            NAMESPACE_KW => "namespace",
            USING_KW => "using",
            CLASS_KW => "class",
            STRUCT_KW => "struct",
            INTERFACE_KW => "interface",
            ENUM_KW => "enum",
            DELEGATE_KW => "delegate",
            CHECKED_KW => "checked",
            UNCHECKED_KW => "unchecked",
            UNSAFE_KW => "unsafe",
            OPERATOR_KW => "operator",
            EXPLICIT_KW => "explicit",
            IMPLICIT_KW => "implicit",
            YIELD_KW => "yield",
            PARTIAL_KW => "partial",
            ALIAS_KW => "alias",
            GLOBAL_KW => "global",
            GET_KW => "get",
            SET_KW => "set",
            INIT_KW => "init",
            ADD_KW => "add",
            REMOVE_KW => "remove",
            WHERE_KW => "where",
            ASYNC_KW => "async",
            AWAIT_KW => "await",
            WHEN_KW => "when",
            RECORD_KW => "record",
            WITH_KW => "with",
            REQUIRED_KW => "required",
            FILE_KW => "file",
            ELIF_KW => "elif",
            ENDIF_KW => "endif",
            REGION_KW => "region",
            ENDREGION_KW => "endregion",
            DEFINE_KW => "define",
            UNDEF_KW => "undef",
            WARNING_KW => "warning",
            ERROR_KW => "error",
            LINE_KW => "line",
            PRAGMA_KW => "pragma",
            HIDDEN_KW => "hidden",
            NULLABLE_KW => "nullable",
            ENABLE_KW => "enable",
            DISABLE_KW => "disable",
            RESTORE_KW => "restore",
            WARNINGS_KW => "warnings",
            ANNOTATIONS_KW => "annotations",
            INTERPOLATED_STRING_START => "$\"",
            INTERPOLATED_VERBATIM_STRING_START => "$@\"",
            INTERPOLATED_STRING_END => "\"",
            END_OF_DIRECTIVE | END_OF_DOCUMENTATION_COMMENT | END_OF_FILE => "",
            _ => return None,
        };
        Some(text)
    }

    /// Reserved keyword spelled `text`.
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "bool" => BOOL_KW,
            "byte" => BYTE_KW,
            "sbyte" => SBYTE_KW,
            "short" => SHORT_KW,
            "ushort" => USHORT_KW,
            "int" => INT_KW,
            "uint" => UINT_KW,
            "long" => LONG_KW,
            "ulong" => ULONG_KW,
            "double" => DOUBLE_KW,
            "float" => FLOAT_KW,
            "decimal" => DECIMAL_KW,
            "string" => STRING_KW,
            "char" => CHAR_KW,
            "void" => VOID_KW,
            "object" => OBJECT_KW,
            "typeof" => TYPEOF_KW,
            "sizeof" => SIZEOF_KW,
            "null" => NULL_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "if" => IF_KW,
            "else" => ELSE_KW,
            "while" => WHILE_KW,
            "for" => FOR_KW,
            "foreach" => FOREACH_KW,
            "do" => DO_KW,
            "switch" => SWITCH_KW,
            "case" => CASE_KW,
            "default" => DEFAULT_KW,
            "try" => TRY_KW,
            "catch" => CATCH_KW,
            "finally" => FINALLY_KW,
            "lock" => LOCK_KW,
            "goto" => GOTO_KW,
            "break" => BREAK_KW,
            "continue" => CONTINUE_KW,
            "return" => RETURN_KW,
            "throw" => THROW_KW,
            "public" => PUBLIC_KW,
            "private" => PRIVATE_KW,
            "internal" => INTERNAL_KW,
            "protected" => PROTECTED_KW,
            "static" => STATIC_KW,
            "readonly" => READONLY_KW,
            "sealed" => SEALED_KW,
            "const" => CONST_KW,
            "fixed" => FIXED_KW,
            "stackalloc" => STACKALLOC_KW,
            "volatile" => VOLATILE_KW,
            "new" => NEW_KW,
            "override" => OVERRIDE_KW,
            "abstract" => ABSTRACT_KW,
            "virtual" => VIRTUAL_KW,
            "event" => EVENT_KW,
            "extern" => EXTERN_KW,
            "ref" => REF_KW,
            "out" => OUT_KW,
            "in" => IN_KW,
            "is" => IS_KW,
            "as" => AS_KW,
            "params" => PARAMS_KW,
            "this" => THIS_KW,
            "base" => BASE_KW,
            "namespace" => NAMESPACE_KW,
            "using" => USING_KW,
            "class" => CLASS_KW,
            "struct" => STRUCT_KW,
            "interface" => INTERFACE_KW,
            "enum" => ENUM_KW,
            "delegate" => DELEGATE_KW,
            "checked" => CHECKED_KW,
            "unchecked" => UNCHECKED_KW,
            "unsafe" => UNSAFE_KW,
            "operator" => OPERATOR_KW,
            "explicit" => EXPLICIT_KW,
            "implicit" => IMPLICIT_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// Contextual keyword spelled `text`; such words lex as identifiers.
    pub fn contextual_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "yield" => YIELD_KW,
            "partial" => PARTIAL_KW,
            "alias" => ALIAS_KW,
            "global" => GLOBAL_KW,
            "get" => GET_KW,
            "set" => SET_KW,
            "init" => INIT_KW,
            "add" => ADD_KW,
            "remove" => REMOVE_KW,
            "where" => WHERE_KW,
            "async" => ASYNC_KW,
            "await" => AWAIT_KW,
            "when" => WHEN_KW,
            "record" => RECORD_KW,
            "with" => WITH_KW,
            "required" => REQUIRED_KW,
            "file" => FILE_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// Keyword recognised right after `#` or inside a directive.
    pub fn preprocessor_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "if" => IF_KW,
            "else" => ELSE_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "default" => DEFAULT_KW,
            "elif" => ELIF_KW,
            "endif" => ENDIF_KW,
            "region" => REGION_KW,
            "endregion" => ENDREGION_KW,
            "define" => DEFINE_KW,
            "undef" => UNDEF_KW,
            "warning" => WARNING_KW,
            "error" => ERROR_KW,
            "line" => LINE_KW,
            "pragma" => PRAGMA_KW,
            "hidden" => HIDDEN_KW,
            "nullable" => NULLABLE_KW,
            "enable" => ENABLE_KW,
            "disable" => DISABLE_KW,
            "restore" => RESTORE_KW,
            "warnings" => WARNINGS_KW,
            "annotations" => ANNOTATIONS_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// Binary expression kind produced by operator token `self`.
    pub const fn binary_expression(self) -> Option<Self> {
        let kind = match self {
            PLUS => ADD_EXPRESSION,
            MINUS => SUBTRACT_EXPRESSION,
            ASTERISK => MULTIPLY_EXPRESSION,
            SLASH => DIVIDE_EXPRESSION,
            PERCENT => MODULO_EXPRESSION,
            LESS_THAN_LESS_THAN => LEFT_SHIFT_EXPRESSION,
            GREATER_THAN_GREATER_THAN => RIGHT_SHIFT_EXPRESSION,
            GREATER_THAN_GREATER_THAN_GREATER_THAN => UNSIGNED_RIGHT_SHIFT_EXPRESSION,
            BAR_BAR => LOGICAL_OR_EXPRESSION,
            AMPERSAND_AMPERSAND => LOGICAL_AND_EXPRESSION,
            BAR => BITWISE_OR_EXPRESSION,
            AMPERSAND => BITWISE_AND_EXPRESSION,
            CARET => EXCLUSIVE_OR_EXPRESSION,
            EQUALS_EQUALS => EQUALS_EXPRESSION,
            EXCLAMATION_EQUALS => NOT_EQUALS_EXPRESSION,
            LESS_THAN => LESS_THAN_EXPRESSION,
            LESS_THAN_EQUALS => LESS_THAN_OR_EQUAL_EXPRESSION,
            GREATER_THAN => GREATER_THAN_EXPRESSION,
            GREATER_THAN_EQUALS => GREATER_THAN_OR_EQUAL_EXPRESSION,
            IS_KW => IS_EXPRESSION,
            AS_KW => AS_EXPRESSION,
            QUESTION_QUESTION => COALESCE_EXPRESSION,
            _ => return None,
        };
        Some(kind)
    }

    /// Assignment expression kind produced by operator token `self`.
    pub const fn assignment_expression(self) -> Option<Self> {
        let kind = match self {
            EQUALS => SIMPLE_ASSIGNMENT_EXPRESSION,
            PLUS_EQUALS => ADD_ASSIGNMENT_EXPRESSION,
            MINUS_EQUALS => SUBTRACT_ASSIGNMENT_EXPRESSION,
            ASTERISK_EQUALS => MULTIPLY_ASSIGNMENT_EXPRESSION,
            SLASH_EQUALS => DIVIDE_ASSIGNMENT_EXPRESSION,
            PERCENT_EQUALS => MODULO_ASSIGNMENT_EXPRESSION,
            AMPERSAND_EQUALS => AND_ASSIGNMENT_EXPRESSION,
            CARET_EQUALS => EXCLUSIVE_OR_ASSIGNMENT_EXPRESSION,
            BAR_EQUALS => OR_ASSIGNMENT_EXPRESSION,
            LESS_THAN_LESS_THAN_EQUALS => LEFT_SHIFT_ASSIGNMENT_EXPRESSION,
            GREATER_THAN_GREATER_THAN_EQUALS => RIGHT_SHIFT_ASSIGNMENT_EXPRESSION,
            GREATER_THAN_GREATER_THAN_GREATER_THAN_EQUALS => {
                UNSIGNED_RIGHT_SHIFT_ASSIGNMENT_EXPRESSION
            }
            QUESTION_QUESTION_EQUALS => COALESCE_ASSIGNMENT_EXPRESSION,
            _ => return None,
        };
        Some(kind)
    }

    /// Prefix unary expression kind produced by operator token `self`.
    pub const fn prefix_unary_expression(self) -> Option<Self> {
        let kind = match self {
            PLUS => UNARY_PLUS_EXPRESSION,
            MINUS => UNARY_MINUS_EXPRESSION,
            TILDE => BITWISE_NOT_EXPRESSION,
            EXCLAMATION => LOGICAL_NOT_EXPRESSION,
            PLUS_PLUS => PRE_INCREMENT_EXPRESSION,
            MINUS_MINUS => PRE_DECREMENT_EXPRESSION,
            AMPERSAND => ADDRESS_OF_EXPRESSION,
            ASTERISK => POINTER_INDIRECTION_EXPRESSION,
            CARET => INDEX_EXPRESSION,
            _ => return None,
        };
        Some(kind)
    }

    /// Literal expression kind wrapping a token of kind `self`.
    pub const fn literal_expression(self) -> Option<Self> {
        let kind = match self {
            NUMERIC_LITERAL => NUMERIC_LITERAL_EXPRESSION,
            STRING_LITERAL => STRING_LITERAL_EXPRESSION,
            CHARACTER_LITERAL => CHARACTER_LITERAL_EXPRESSION,
            TRUE_KW => TRUE_LITERAL_EXPRESSION,
            FALSE_KW => FALSE_LITERAL_EXPRESSION,
            NULL_KW => NULL_LITERAL_EXPRESSION,
            DEFAULT_KW => DEFAULT_LITERAL_EXPRESSION,
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_disjoint() {
        for raw in 0..SyntaxKind::COUNT as u16 {
            let kind: SyntaxKind = unsafe { std::mem::transmute(raw) };
            assert!(!(kind.is_token() && kind.is_trivia()), "{kind:?}");
            assert!(!(kind.is_token() && kind.is_node()), "{kind:?}");
            if kind.is_keyword() {
                assert!(kind.fixed_text().is_some(), "{kind:?}");
            }
        }
    }

    #[test]
    fn keyword_tables_round_trip() {
        assert_eq!(SyntaxKind::keyword("class"), Some(CLASS_KW));
        assert_eq!(SyntaxKind::keyword("partial"), None);
        assert_eq!(SyntaxKind::contextual_keyword("partial"), Some(PARTIAL_KW));
        assert_eq!(SyntaxKind::preprocessor_keyword("endregion"), Some(ENDREGION_KW));
        assert_eq!(CLASS_KW.fixed_text(), Some("class"));
        assert_eq!(IDENTIFIER.fixed_text(), None);
        assert!(IDENTIFIER.has_variable_text());
        assert!(!INT_KW.has_variable_text());
    }

    #[test]
    fn expression_classification() {
        assert!(ADD_EXPRESSION.is_expression());
        assert!(IDENTIFIER_NAME.is_expression());
        assert!(PREDEFINED_TYPE.is_type());
        assert!(!TYPE_ARGUMENT_LIST.is_type());
        assert!(!ARGUMENT_LIST.is_expression());
        assert!(BLOCK.is_statement());
        assert!(!ELSE_CLAUSE.is_statement());
        assert!(IF_DIRECTIVE_TRIVIA.is_directive());
        assert!(IF_DIRECTIVE_TRIVIA.is_structured_trivia());
        assert!(!SKIPPED_TOKENS_TRIVIA.is_directive());
        assert!(METHOD_DECLARATION.is_member_declaration());
        assert!(!ENUM_MEMBER_DECLARATION.is_member_declaration());
    }
}
