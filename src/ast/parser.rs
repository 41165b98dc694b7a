use super::ast::*;
use super::ast_kind::ASTKind;
use super::cursor::Cursor;
use crate::error::{get_location, print_span, Error, ErrorType, Result};
use bumpalo::collections::Vec;
use logos::Span;

type ParseResult<T> = std::result::Result<T, private::ParseError>;

pub(crate) mod private {
    use super::{ASTContext, ASTKind, Cursor, ErrorType, NamedType, OperationKind, ParseResult, Span};

    /// Private Parser context state that's kept to keep track of the current parser's progress and
    /// state. This contains the AST context's arena and a [Cursor] over the source text.
    pub struct ParserContext<'a> {
        pub(crate) arena: &'a bumpalo::Bump,
        pub(crate) cursor: Cursor<'a>,
        pub(crate) in_var_def: bool,
    }

    impl<'a> ParserContext<'a> {
        /// Create a new Parser context for a given AST context and initialize it with an input source
        /// string to parse from.
        pub(crate) fn new(ctx: &'a ASTContext, source: &'a str) -> Self {
            let mut cursor = Cursor::new(source);
            cursor.skip_ignored();
            ParserContext {
                arena: &ctx.arena,
                cursor,
                in_var_def: false,
            }
        }

        #[inline]
        pub(crate) fn current(&self) -> Option<u8> {
            self.cursor.current()
        }

        #[inline]
        pub(crate) fn position(&self) -> usize {
            self.cursor.position()
        }

        #[inline]
        pub(crate) fn source(&self) -> &'a str {
            self.cursor.source()
        }

        /// Moves past a single byte without skipping ignored tokens.
        #[inline]
        pub(crate) fn advance_one(&mut self, kind: ASTKind) -> ParseResult<()> {
            self.cursor
                .advance_one()
                .map_err(|_| self.unexpected(kind, "more input"))
        }

        /// Moves past `n` bytes and any ignored tokens following them.
        #[inline]
        pub(crate) fn advance_and_skip(&mut self, n: usize, kind: ASTKind) -> ParseResult<()> {
            let position = self.position();
            self.cursor.advance_and_skip(n).map_err(|_| {
                ParseError::new(
                    ErrorType::UnexpectedEnd,
                    format!("Invalid {kind}, unexpected end of input"),
                    position,
                )
            })
        }

        /// Consumes the punctuator `byte` and any ignored tokens following it.
        #[inline]
        pub(crate) fn expect(&mut self, byte: u8, kind: ASTKind) -> ParseResult<()> {
            if self.current() == Some(byte) {
                self.advance_and_skip(1, kind)
            } else {
                Err(self.unexpected(kind, &format!("`{}`", byte as char)))
            }
        }

        /// Creates an error for the current position, naming what the grammar expected instead.
        pub(crate) fn unexpected(&self, kind: ASTKind, expected: &str) -> ParseError {
            match self.cursor.remainder().chars().next() {
                Some(found) => ParseError::new(
                    ErrorType::Syntax,
                    format!("Invalid {kind}, expected {expected} but found `{found}`"),
                    self.position(),
                ),
                None => ParseError::new(
                    ErrorType::UnexpectedEnd,
                    format!("Invalid {kind}, expected {expected} but reached the end of input"),
                    self.position(),
                ),
            }
        }

        pub(crate) fn not_supported(&self, message: &str) -> ParseError {
            ParseError::new(ErrorType::NotSupported, message, self.position())
        }
    }

    /// The failure of a grammar function, pointing at the byte offset where parsing stopped.
    #[derive(Debug, PartialEq, Eq, Clone)]
    pub struct ParseError {
        pub(crate) error_type: ErrorType,
        pub(crate) message: String,
        pub(crate) position: usize,
    }

    impl ParseError {
        pub(crate) fn new<S: Into<String>>(error_type: ErrorType, message: S, position: usize) -> Self {
            ParseError {
                error_type,
                message: message.into(),
                position,
            }
        }

        /// Prefixes the message with the operation the error occurred in.
        pub(crate) fn within(mut self, operation: OperationKind, name: Option<NamedType>) -> Self {
            self.message = match name {
                Some(name) => format!("in {} {}: {}", operation, name.name, self.message),
                None => format!("in anonymous {}: {}", operation, self.message),
            };
            self
        }

        /// Returns the span of the character the error points at.
        pub(crate) fn span(&self, source: &str) -> Span {
            let mut start = self.position.min(source.len());
            while !source.is_char_boundary(start) {
                start -= 1;
            }
            let end = source[start..]
                .chars()
                .next()
                .map_or(start, |c| start + c.len_utf8());
            start..end
        }
    }

    /// (Private) Trait for parsing AST Nodes from a Parser Context.
    /// The [`super::ParseNode`] trait implements the public `parse` method instead.
    pub trait ParseNode<'a>: Sized {
        fn new_with_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

use private::ParseError;

/// Trait for parsing AST Nodes from source texts using recursive descent over a byte cursor.
///
/// This trait is implemented by all AST Nodes and can hence be used to granularly parse GraphQL language.
/// However, mostly this will be used via `Document::parse`.
pub trait ParseNode<'a>: private::ParseNode<'a> {
    /// Parse an input source text into the implementor's AST Node structure and allocate the
    /// resulting AST into the current AST Context's arena.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = private::ParserContext::new(ctx, source);
        match Self::new_with_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(error) => {
                log::debug!(
                    "parsing failed at byte {}: {}",
                    error.position,
                    error.message
                );
                let span = error.span(source);
                let location = get_location(source, span.clone());
                let context = print_span(source, span);
                Err(Error::new_with_context(
                    error.message,
                    Some(location),
                    context,
                    Some(error.error_type),
                ))
            }
        }
    }
}

impl<'a, T: private::ParseNode<'a>> ParseNode<'a> for T {}

impl<'a> private::ParseNode<'a> for BooleanValue {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<BooleanValue> {
        let value = match ctx.cursor.peek_name() {
            "true" => true,
            "false" => false,
            _ => return Err(ctx.unexpected(ASTKind::Boolean, "`true` or `false`")),
        };
        ctx.cursor.read_name();
        Ok(BooleanValue { value })
    }
}

impl<'a> private::ParseNode<'a> for EnumValue<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<EnumValue<'a>> {
        match ctx.cursor.peek_name() {
            "" | "true" | "false" | "null" => Err(ctx.unexpected(ASTKind::Enum, "an enum value")),
            _ => Ok(EnumValue {
                value: ctx.cursor.read_name(),
            }),
        }
    }
}

impl<'a> private::ParseNode<'a> for Variable<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Variable<'a>> {
        ctx.expect(b'$', ASTKind::Variable)?;
        if ctx.cursor.is_name() {
            Ok(Variable {
                name: ctx.cursor.read_name(),
            })
        } else {
            Err(ctx.unexpected(ASTKind::Variable, "a variable name"))
        }
    }
}

/// Reads the four hexadecimal digits of a `\u` escape sequence.
fn parse_code_unit(ctx: &mut private::ParserContext, escape_position: usize) -> ParseResult<u32> {
    use lexical_core::*;
    const FORMAT: u128 = NumberFormatBuilder::hexadecimal();
    const OPTIONS: ParseIntegerOptions = ParseIntegerOptions::new();

    let digits = ctx.cursor.take_fixed(4).map_err(|_| {
        ParseError::new(
            ErrorType::UnexpectedEnd,
            "Invalid String, expected four hexadecimal digits but reached the end of input",
            ctx.source().len(),
        )
    })?;
    let invalid = || {
        ParseError::new(
            ErrorType::Syntax,
            format!(
                "Invalid String, invalid unicode escape sequence `\\u{}`",
                String::from_utf8_lossy(digits)
            ),
            escape_position,
        )
    };
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return Err(invalid());
    }
    parse_with_options::<u32, FORMAT>(digits, &OPTIONS).map_err(|_| invalid())
}

/// Decodes a `\u` escape sequence, with the cursor placed after the `u`. A high surrogate must be
/// followed by a second escape sequence holding the low surrogate, and both are merged into one
/// character.
fn parse_unicode_escape(
    ctx: &mut private::ParserContext,
    escape_position: usize,
) -> ParseResult<char> {
    let lone_surrogate = |unit: u32| {
        ParseError::new(
            ErrorType::Syntax,
            format!("Invalid String, unpaired surrogate `\\u{unit:04X}`"),
            escape_position,
        )
    };
    let unit = parse_code_unit(ctx, escape_position)?;
    let code_point = match unit {
        0xD800..=0xDBFF
            if ctx.current() == Some(b'\\') && ctx.cursor.peek_next() == Some(b'u') =>
        {
            let low_position = ctx.position();
            ctx.advance_one(ASTKind::String)?;
            ctx.advance_one(ASTKind::String)?;
            let low = parse_code_unit(ctx, low_position)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(lone_surrogate(unit));
            }
            0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
        }
        0xD800..=0xDFFF => return Err(lone_surrogate(unit)),
        unit => unit,
    };
    char::from_u32(code_point).ok_or_else(|| lone_surrogate(code_point))
}

impl<'a> private::ParseNode<'a> for StringValue<'a> {
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<StringValue<'a>> {
        if ctx.current() != Some(b'"') {
            return Err(ctx.unexpected(ASTKind::String, "`\"`"));
        } else if ctx.cursor.has_prefix("\"\"\"") {
            return Err(ctx.not_supported("block strings are not supported"));
        }
        ctx.advance_one(ASTKind::String)?;

        // Strings without escape sequences are borrowed from the source text as-is, otherwise
        // runs of plain text are copied into `output` in between decoded escape sequences.
        let mut output: Option<String> = None;
        let mut run_start = ctx.position();
        loop {
            match ctx.current() {
                Some(b'"') => {
                    let run = ctx.cursor.slice(run_start, ctx.position());
                    let value: &'a str = match output {
                        Some(mut output) => {
                            output.push_str(run);
                            ctx.arena.alloc_str(&output)
                        }
                        None => run,
                    };
                    ctx.advance_and_skip(1, ASTKind::String)?;
                    return Ok(StringValue { value });
                }
                Some(b'\\') => {
                    let escape_position = ctx.position();
                    let output = output.get_or_insert_with(String::new);
                    output.push_str(ctx.cursor.slice(run_start, escape_position));
                    ctx.advance_one(ASTKind::String)?;
                    let escaped = match ctx.current() {
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'/') => '/',
                        Some(b'b') => '\u{0008}',
                        Some(b'f') => '\u{000C}',
                        Some(b'n') => '\n',
                        Some(b'r') => '\r',
                        Some(b't') => '\t',
                        Some(b'u') => {
                            ctx.advance_one(ASTKind::String)?;
                            output.push(parse_unicode_escape(ctx, escape_position)?);
                            run_start = ctx.position();
                            continue;
                        }
                        Some(_) => {
                            let found = ctx.cursor.remainder().chars().next().unwrap_or('?');
                            return Err(ParseError::new(
                                ErrorType::Syntax,
                                format!("Invalid String, invalid escape sequence `\\{found}`"),
                                escape_position,
                            ));
                        }
                        None => return Err(ctx.unexpected(ASTKind::String, "an escape sequence")),
                    };
                    output.push(escaped);
                    ctx.advance_one(ASTKind::String)?;
                    run_start = ctx.position();
                }
                Some(b'\n' | b'\r') => {
                    return Err(ParseError::new(
                        ErrorType::Syntax,
                        "Invalid String, string values cannot contain line terminators",
                        ctx.position(),
                    ));
                }
                Some(_) => ctx.advance_one(ASTKind::String)?,
                None => return Err(ctx.unexpected(ASTKind::String, "a closing `\"`")),
            }
        }
    }
}

impl<'a> private::ParseNode<'a> for Value<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Value<'a>> {
        match ctx.current() {
            Some(b'$') if ctx.in_var_def => Err(ParseError::new(
                ErrorType::Syntax,
                "Invalid Variable Definition, default values cannot contain variables",
                ctx.position(),
            )),
            Some(b'$') => Variable::new_with_ctx(ctx).map(Value::Variable),
            Some(b'"') => StringValue::new_with_ctx(ctx).map(Value::String),
            _ if ctx.cursor.is_name() => Ok(match ctx.cursor.read_name() {
                "true" => Value::Boolean(BooleanValue { value: true }),
                "false" => Value::Boolean(BooleanValue { value: false }),
                "null" => Value::Null,
                value => Value::Enum(EnumValue { value }),
            }),
            Some(b'-' | b'0'..=b'9') => Err(ctx.not_supported("numeric values are not supported")),
            Some(b'[') => Err(ctx.not_supported("list values are not supported")),
            Some(b'{') => Err(ctx.not_supported("object values are not supported")),
            Some(_) => Err(ctx.not_supported("unsupported value")),
            None => Err(ctx.unexpected(ASTKind::Value, "a value")),
        }
    }
}

impl<'a> private::ParseNode<'a> for Argument<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Argument<'a>> {
        if !ctx.cursor.is_name() {
            return Err(ctx.unexpected(ASTKind::Argument, "an argument name"));
        }
        let name = ctx.cursor.read_name();
        ctx.expect(b':', ASTKind::Argument)?;
        let value = Value::new_with_ctx(ctx)?;
        Ok(Argument { name, value })
    }
}

impl<'a> private::ParseNode<'a> for Arguments<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Arguments<'a>> {
        if ctx.current() != Some(b'(') {
            return Ok(Arguments::default_in(ctx.arena));
        }
        ctx.advance_and_skip(1, ASTKind::Arguments)?;
        let mut children: Vec<'a, Argument<'a>> = Vec::new_in(ctx.arena);
        loop {
            if ctx.current() == Some(b')') {
                ctx.advance_and_skip(1, ASTKind::Arguments)?;
                break;
            }
            let position = ctx.position();
            let argument = Argument::new_with_ctx(ctx)?;
            if children.iter().any(|existing| existing.name == argument.name) {
                return Err(ParseError::new(
                    ErrorType::Semantic,
                    format!("duplicate argument name {}", argument.name),
                    position,
                ));
            }
            children.push(argument);
        }
        Ok(Arguments { children })
    }
}

impl<'a> private::ParseNode<'a> for Directive<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Directive<'a>> {
        ctx.expect(b'@', ASTKind::Directive)?;
        if !ctx.cursor.is_name() {
            return Err(ctx.unexpected(ASTKind::Directive, "a directive name"));
        }
        let name = ctx.cursor.read_name();
        let arguments = Arguments::new_with_ctx(ctx)?;
        Ok(Directive { name, arguments })
    }
}

impl<'a> private::ParseNode<'a> for Directives<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Directives<'a>> {
        let mut builder = Vec::new_in(ctx.arena);
        while let Some(b'@') = ctx.current() {
            builder.push(Directive::new_with_ctx(ctx)?);
        }
        Ok(Directives { children: builder })
    }
}

impl<'a> private::ParseNode<'a> for Field<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Field<'a>> {
        if !ctx.cursor.is_name() {
            return Err(ctx.unexpected(ASTKind::Field, "a field name"));
        }
        let name_or_alias = ctx.cursor.read_name();
        let (alias, name) = if let Some(b':') = ctx.current() {
            ctx.advance_and_skip(1, ASTKind::Field)?;
            if !ctx.cursor.is_name() {
                return Err(ctx.unexpected(ASTKind::Field, "a field name after the alias"));
            }
            (Some(name_or_alias), ctx.cursor.read_name())
        } else {
            (None, name_or_alias)
        };

        let arguments = Arguments::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        let selection_set = if let Some(b'{') = ctx.current() {
            SelectionSet::new_with_ctx(ctx)?
        } else {
            SelectionSet::default_in(ctx.arena)
        };

        Ok(Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for NamedType<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<NamedType<'a>> {
        if ctx.cursor.is_name() {
            Ok(NamedType {
                name: ctx.cursor.read_name(),
            })
        } else {
            Err(ctx.unexpected(ASTKind::NamedType, "a name"))
        }
    }
}

impl<'a> private::ParseNode<'a> for TypeCondition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<TypeCondition<'a>> {
        if ctx.cursor.peek_name() != "on" {
            return Err(ctx.unexpected(ASTKind::TypeCondition, "`on`"));
        }
        ctx.cursor.read_name();
        if !ctx.cursor.is_name() {
            return Err(ctx.unexpected(ASTKind::TypeCondition, "a type name after `on`"));
        }
        Ok(TypeCondition {
            named_type: NamedType {
                name: ctx.cursor.read_name(),
            },
        })
    }
}

impl<'a> private::ParseNode<'a> for FragmentSpread<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<FragmentSpread<'a>> {
        if ctx.cursor.has_prefix("...") {
            ctx.advance_and_skip(3, ASTKind::FragmentSpread)?;
        }
        match ctx.cursor.peek_name() {
            "" | "on" => Err(ctx.unexpected(ASTKind::FragmentSpread, "a fragment name")),
            _ => {
                let name = NamedType {
                    name: ctx.cursor.read_name(),
                };
                let directives = Directives::new_with_ctx(ctx)?;
                Ok(FragmentSpread { name, directives })
            }
        }
    }
}

impl<'a> private::ParseNode<'a> for InlineFragment<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<InlineFragment<'a>> {
        if ctx.cursor.has_prefix("...") {
            ctx.advance_and_skip(3, ASTKind::InlineFragment)?;
        }
        let type_condition = if ctx.cursor.peek_name() == "on" {
            Some(TypeCondition::new_with_ctx(ctx)?)
        } else {
            None
        };
        let directives = Directives::new_with_ctx(ctx)?;
        if let Some(b'{') = ctx.current() {
            let selection_set = SelectionSet::new_with_ctx(ctx)?;
            Ok(InlineFragment {
                type_condition,
                directives,
                selection_set,
            })
        } else {
            Err(ctx.unexpected(ASTKind::InlineFragment, "a selection set `{`"))
        }
    }
}

impl<'a> private::ParseNode<'a> for Selection<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Selection<'a>> {
        if ctx.cursor.has_prefix("...") {
            ctx.advance_and_skip(3, ASTKind::Selection)?;
            // A spread is either an inline fragment or a fragment spread, never both.
            match ctx.cursor.peek_name() {
                "on" => InlineFragment::new_with_ctx(ctx).map(Selection::InlineFragment),
                "" => match ctx.current() {
                    Some(b'{' | b'@') => {
                        InlineFragment::new_with_ctx(ctx).map(Selection::InlineFragment)
                    }
                    _ => Err(ctx.unexpected(
                        ASTKind::Selection,
                        "a fragment name, `on`, `@`, or `{` after `...`",
                    )),
                },
                _ => FragmentSpread::new_with_ctx(ctx).map(Selection::FragmentSpread),
            }
        } else if ctx.cursor.is_name() {
            Field::new_with_ctx(ctx).map(Selection::Field)
        } else {
            Err(ctx.unexpected(
                ASTKind::Selection,
                "a field, fragment spread, or inline fragment",
            ))
        }
    }
}

impl<'a> private::ParseNode<'a> for SelectionSet<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<SelectionSet<'a>> {
        ctx.expect(b'{', ASTKind::SelectionSet)?;
        let mut selections = Vec::new_in(ctx.arena);
        loop {
            match ctx.current() {
                Some(b'}') => {
                    ctx.advance_and_skip(1, ASTKind::SelectionSet)?;
                    break;
                }
                None => return Err(ctx.unexpected(ASTKind::SelectionSet, "`}`")),
                Some(_) => selections.push(Selection::new_with_ctx(ctx)?),
            }
        }
        Ok(SelectionSet { selections })
    }
}

impl<'a> private::ParseNode<'a> for Type<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Type<'a>> {
        let of_type = if let Some(b'[') = ctx.current() {
            ctx.advance_and_skip(1, ASTKind::ListType)?;
            let inner = Type::new_with_ctx(ctx)?;
            ctx.expect(b']', ASTKind::ListType)?;
            Type::ListType(ctx.arena.alloc(inner))
        } else if ctx.cursor.is_name() {
            Type::NamedType(NamedType {
                name: ctx.cursor.read_name(),
            })
        } else {
            return Err(ctx.unexpected(ASTKind::Type, "a type name or `[`"));
        };
        if let Some(b'!') = ctx.current() {
            ctx.advance_and_skip(1, ASTKind::Type)?;
            Ok(Type::NonNullType(ctx.arena.alloc(of_type)))
        } else {
            Ok(of_type)
        }
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<VariableDefinition<'a>> {
        let variable = Variable::new_with_ctx(ctx)?;
        ctx.expect(b':', ASTKind::VariableDefinition)?;
        let of_type = Type::new_with_ctx(ctx)?;
        let default_value = if let Some(b'=') = ctx.current() {
            ctx.advance_and_skip(1, ASTKind::VariableDefinition)?;
            ctx.in_var_def = true;
            let value = Value::new_with_ctx(ctx);
            ctx.in_var_def = false;
            Some(value?)
        } else {
            None
        };
        let directives = Directives::new_with_ctx(ctx)?;
        Ok(VariableDefinition {
            variable,
            of_type,
            default_value,
            directives,
        })
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinitions<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<VariableDefinitions<'a>> {
        let children = if let Some(b'(') = ctx.current() {
            ctx.advance_and_skip(1, ASTKind::VariableDefinitions)?;
            let mut builder = Vec::new_in(ctx.arena);
            loop {
                builder.push(VariableDefinition::new_with_ctx(ctx)?);
                if let Some(b')') = ctx.current() {
                    ctx.advance_and_skip(1, ASTKind::VariableDefinitions)?;
                    break;
                }
            }
            builder
        } else {
            Vec::new_in(ctx.arena)
        };
        Ok(VariableDefinitions { children })
    }
}

impl<'a> private::ParseNode<'a> for FragmentDefinition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<FragmentDefinition<'a>> {
        if !ctx.cursor.peek_name().eq_ignore_ascii_case("fragment") {
            return Err(ctx.unexpected(ASTKind::FragmentDefinition, "`fragment`"));
        }
        ctx.cursor.read_name();
        if !ctx.cursor.is_name() {
            return Err(ctx.unexpected(ASTKind::FragmentDefinition, "a fragment name"));
        }
        let position = ctx.position();
        let name = NamedType {
            name: ctx.cursor.read_name(),
        };
        if name.name == "on" {
            return Err(ParseError::new(
                ErrorType::Semantic,
                "'on' is not a valid fragment name",
                position,
            ));
        }
        let type_condition = TypeCondition::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        if let Some(b'{') = ctx.current() {
            let selection_set = SelectionSet::new_with_ctx(ctx)?;
            Ok(FragmentDefinition {
                name,
                type_condition,
                directives,
                selection_set,
            })
        } else {
            Err(ctx.unexpected(ASTKind::FragmentDefinition, "a selection set `{`"))
        }
    }
}

impl<'a> private::ParseNode<'a> for OperationDefinition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<OperationDefinition<'a>> {
        let (operation, name) = if ctx.cursor.is_name() {
            let position = ctx.position();
            let keyword = ctx.cursor.read_name();
            let operation = OperationKind::from_keyword(keyword).ok_or_else(|| {
                ParseError::new(
                    ErrorType::Syntax,
                    format!("Invalid Operation Definition, unknown operation type `{keyword}`"),
                    position,
                )
            })?;
            let name = if ctx.cursor.is_name() {
                Some(NamedType {
                    name: ctx.cursor.read_name(),
                })
            } else {
                None
            };
            (operation, name)
        } else {
            (OperationKind::Query, None)
        };

        let variable_definitions = VariableDefinitions::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        if ctx.current() != Some(b'{') {
            return Err(ctx.unexpected(ASTKind::OperationDefinition, "a selection set `{`"));
        }
        let selection_set =
            SelectionSet::new_with_ctx(ctx).map_err(|error| error.within(operation, name))?;
        Ok(OperationDefinition {
            operation,
            name,
            variable_definitions,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for Definition<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Definition<'a>> {
        let keyword = ctx.cursor.peek_name();
        if keyword.eq_ignore_ascii_case("fragment") {
            FragmentDefinition::new_with_ctx(ctx).map(Definition::Fragment)
        } else if keyword.is_empty() || OperationKind::from_keyword(keyword).is_some() {
            OperationDefinition::new_with_ctx(ctx).map(Definition::Operation)
        } else {
            Err(ParseError::new(
                ErrorType::Syntax,
                format!(
                    "Invalid {}, expected an operation type or `fragment` but found `{keyword}`",
                    ASTKind::Definition
                ),
                ctx.position(),
            ))
        }
    }
}

impl<'a> private::ParseNode<'a> for Document<'a> {
    #[inline]
    fn new_with_ctx(ctx: &mut private::ParserContext<'a>) -> ParseResult<Document<'a>> {
        let mut document = Document::new_in(ctx.arena);
        while !ctx.cursor.is_at_end() {
            let position = ctx.position();
            let definition = Definition::new_with_ctx(ctx)?;
            document
                .insert(definition)
                .map_err(|error| ParseError::new(error.error_type, error.message, position))?;
        }
        document.size_hint = ctx.source().len();
        log::debug!(
            "parsed document with {} operation(s) and {} fragment(s)",
            document.operations.len(),
            document.fragments.len()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::collections::Vec;

    use crate::error::{ErrorType, Location};

    use super::{super::ast::*, ParseNode};

    fn assert_parse<'a, T: 'a>(ctx: &'a ASTContext, source: &'a str, expected: T)
    where
        T: ParseNode<'a> + std::fmt::Debug + PartialEq,
    {
        assert_eq!(*T::parse(ctx, source).unwrap(), expected);
    }

    fn assert_error<'a, T: 'a>(ctx: &'a ASTContext, source: &'a str, error_type: ErrorType)
    where
        T: ParseNode<'a> + std::fmt::Debug,
    {
        let error = T::parse(ctx, source).unwrap_err();
        assert_eq!(error.error_type(), error_type, "{:?}", error);
    }

    fn leaf<'a>(ctx: &'a ASTContext, name: &'a str) -> Selection<'a> {
        Selection::Field(Field::new_leaf(ctx, name))
    }

    #[test]
    fn error() {
        let ctx = ASTContext::new();
        let result = Document::parse(&ctx, "query { document { $ }}");

        assert_eq!(
            result.err().unwrap().location,
            Some(Location {
                column: 19,
                line: 1
            })
        );

        let result = Document::parse(
            &ctx,
            "query {
            document {
                $
            }
        }",
        );
        assert_eq!(
            result.err().unwrap().location,
            Some(Location {
                column: 16,
                line: 3
            })
        );
    }

    #[test]
    fn error_messages() {
        let ctx = ASTContext::new();
        let error = Document::parse(&ctx, "query Q { a( }").unwrap_err();
        assert_eq!(
            error.message(),
            "in query Q: Invalid Argument, expected an argument name but found `}`"
        );
        assert_eq!(error.error_type(), ErrorType::Syntax);

        let error = Document::parse(&ctx, "{ a { b }").unwrap_err();
        assert_eq!(
            error.message(),
            "in anonymous query: Invalid Selection Set, expected `}` but reached the end of input"
        );
        assert_eq!(error.error_type(), ErrorType::UnexpectedEnd);

        let error = Document::parse(&ctx, "shape { a }").unwrap_err();
        assert_eq!(
            error.message(),
            "Invalid Definition, expected an operation type or `fragment` but found `shape`"
        );
        assert_eq!(error.error_type(), ErrorType::Syntax);

        let error = OperationDefinition::parse(&ctx, "shape { a }").unwrap_err();
        assert_eq!(
            error.message(),
            "Invalid Operation Definition, unknown operation type `shape`"
        );
    }

    #[test]
    fn truncation() {
        let ctx = ASTContext::new();
        assert_error::<Document>(&ctx, "query", ErrorType::UnexpectedEnd);
        assert_error::<Document>(&ctx, "{ a(b: ", ErrorType::UnexpectedEnd);
        assert_error::<Document>(&ctx, "{ alias:", ErrorType::UnexpectedEnd);
        assert_error::<Document>(&ctx, "fragment F on", ErrorType::UnexpectedEnd);
        assert_error::<Document>(&ctx, "{ a(b: \"unterminated", ErrorType::UnexpectedEnd);
        assert_error::<Document>(&ctx, "{ a(b: \"\\u00", ErrorType::UnexpectedEnd);
    }

    #[test]
    fn empty_document() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "").unwrap();
        assert!(document.is_empty());
        let document = Document::parse(&ctx, "  # just a comment\n,,").unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn named_type() {
        let ctx = ASTContext::new();
        assert_parse(&ctx, "TypeName", NamedType { name: "TypeName" });
    }

    #[test]
    fn variable() {
        let ctx = ASTContext::new();
        assert_parse(&ctx, "$test", Variable { name: "test" });
        assert_error::<Variable>(&ctx, "$", ErrorType::UnexpectedEnd);
        assert_error::<Variable>(&ctx, "$1", ErrorType::Syntax);
    }

    #[test]
    fn values() {
        let ctx = ASTContext::new();
        assert_parse(&ctx, "true", Value::Boolean(BooleanValue { value: true }));
        assert_parse(&ctx, "false", Value::Boolean(BooleanValue { value: false }));
        assert_parse(&ctx, "$var", Value::Variable(Variable { name: "var" }));
        assert_parse(&ctx, "Opt", Value::Enum(EnumValue { value: "Opt" }));
        assert_parse(&ctx, "MOBILE_WEB", Value::Enum(EnumValue { value: "MOBILE_WEB" }));
        assert_parse(&ctx, "null", Value::Null);
        assert_parse(
            &ctx,
            "\"hello world\"",
            Value::String(StringValue::new(&ctx, "hello world")),
        );
        assert_parse(&ctx, "true", BooleanValue { value: true });
        assert_parse(&ctx, "Opt", EnumValue { value: "Opt" });
        assert_error::<EnumValue>(&ctx, "null", ErrorType::Syntax);
        assert_error::<BooleanValue>(&ctx, "Opt", ErrorType::Syntax);
    }

    #[test]
    fn unsupported_values() {
        let ctx = ASTContext::new();
        assert_error::<Value>(&ctx, "123", ErrorType::NotSupported);
        assert_error::<Value>(&ctx, "-1.5", ErrorType::NotSupported);
        assert_error::<Value>(&ctx, "[1, 2]", ErrorType::NotSupported);
        assert_error::<Value>(&ctx, "{ a: true }", ErrorType::NotSupported);
        assert_error::<Value>(&ctx, "\"\"\"block\"\"\"", ErrorType::NotSupported);
        assert_error::<Value>(&ctx, ")", ErrorType::NotSupported);
        assert_error::<Value>(&ctx, "", ErrorType::UnexpectedEnd);
        assert_error::<Document>(&ctx, "{ a(b: \"\"\"block\"\"\") }", ErrorType::NotSupported);
        assert_error::<Document>(&ctx, "{ a(first: 10) }", ErrorType::NotSupported);
    }

    #[test]
    fn strings() {
        let ctx = ASTContext::new();
        assert_parse(&ctx, r#""""#, StringValue { value: "" });
        assert_parse(
            &ctx,
            r#""\n\t\\\"\/A""#,
            StringValue {
                value: "\n\t\\\"/A",
            },
        );
        assert_parse(&ctx, r#""\b\f\r""#, StringValue { value: "\u{8}\u{c}\r" });
        assert_parse(&ctx, r#""café ☕""#, StringValue { value: "café ☕" });
        assert_parse(&ctx, r#""😀""#, StringValue { value: "😀" });
        assert_parse(&ctx, r#""a \"quoted\" word""#, StringValue { value: "a \"quoted\" word" });

        assert_error::<StringValue>(&ctx, "\"line\nbreak\"", ErrorType::Syntax);
        assert_error::<StringValue>(&ctx, "\"line\rbreak\"", ErrorType::Syntax);
        assert_error::<StringValue>(&ctx, r#""\x""#, ErrorType::Syntax);
        assert_error::<StringValue>(&ctx, r#""\u00G1""#, ErrorType::Syntax);
        assert_error::<StringValue>(&ctx, r#""\uD83D""#, ErrorType::Syntax);
        assert_error::<StringValue>(&ctx, r#""\uDE00""#, ErrorType::Syntax);
        assert_error::<StringValue>(&ctx, r#""\uD83DA""#, ErrorType::Syntax);
        assert_error::<StringValue>(&ctx, "\"open", ErrorType::UnexpectedEnd);

        let error = Document::parse(&ctx, "{ a(b: \"x\n\") }").unwrap_err();
        assert_eq!(error.location(), &Some(Location { line: 1, column: 9 }));
        assert!(error.print(true).ends_with(" |          ^"));
    }

    #[test]
    fn arguments() {
        let ctx = ASTContext::new();
        assert_parse(
            &ctx,
            "()",
            Arguments {
                children: Vec::new_in(&ctx.arena),
            },
        );
        assert_parse(
            &ctx,
            "(a: A, b: $b)",
            Arguments {
                children: Vec::from_iter_in(
                    [
                        Argument {
                            name: "a",
                            value: Value::Enum(EnumValue { value: "A" }),
                        },
                        Argument {
                            name: "b",
                            value: Value::Variable(Variable { name: "b" }),
                        },
                    ],
                    &ctx.arena,
                ),
            },
        );

        let error = Arguments::parse(&ctx, "(a: A, a: B)").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert_eq!(error.message(), "duplicate argument name a");
        assert_error::<Arguments>(&ctx, "(a A)", ErrorType::Syntax);
    }

    #[test]
    fn directives() {
        let ctx = ASTContext::new();

        assert_parse(
            &ctx,
            "#",
            Directives {
                children: Vec::new_in(&ctx.arena),
            },
        );

        assert_parse(
            &ctx,
            "@defer @defer",
            Directives {
                children: Vec::from_iter_in(
                    [
                        Directive {
                            name: "defer",
                            arguments: Arguments {
                                children: Vec::new_in(&ctx.arena),
                            },
                        },
                        Directive {
                            name: "defer",
                            arguments: Arguments {
                                children: Vec::new_in(&ctx.arena),
                            },
                        },
                    ],
                    &ctx.arena,
                ),
            },
        );

        assert_parse(
            &ctx,
            "@include(if: $hi)",
            Directive {
                name: "include",
                arguments: Arguments {
                    children: Vec::from_iter_in(
                        [Argument {
                            name: "if",
                            value: Value::Variable(Variable { name: "hi" }),
                        }],
                        &ctx.arena,
                    ),
                },
            },
        );

        assert_error::<Directive>(&ctx, "@(if: true)", ErrorType::Syntax);
    }

    #[test]
    fn fields() {
        let ctx = ASTContext::new();

        assert_parse(&ctx, "name", Field::new_leaf(&ctx, "name"));
        assert_parse(&ctx, "name {}", Field::new_leaf(&ctx, "name"));

        assert_parse(
            &ctx,
            "alias: name",
            Field {
                alias: Some("alias"),
                ..Field::new_leaf(&ctx, "name")
            },
        );

        assert_parse(
            &ctx,
            "name: name",
            Field {
                alias: Some("name"),
                ..Field::new_leaf(&ctx, "name")
            },
        );

        assert_parse(
            &ctx,
            "alias: name(x: null) @skip(if: true) { child }",
            Field {
                alias: Some("alias"),
                name: "name",
                arguments: Arguments {
                    children: Vec::from_iter_in(
                        [Argument {
                            name: "x",
                            value: Value::Null,
                        }],
                        &ctx.arena,
                    ),
                },
                directives: Directives {
                    children: Vec::from_iter_in(
                        [Directive {
                            name: "skip",
                            arguments: Arguments {
                                children: Vec::from_iter_in(
                                    [Argument {
                                        name: "if",
                                        value: Value::Boolean(BooleanValue { value: true }),
                                    }],
                                    &ctx.arena,
                                ),
                            },
                        }],
                        &ctx.arena,
                    ),
                },
                selection_set: SelectionSet {
                    selections: Vec::from_iter_in([leaf(&ctx, "child")], &ctx.arena),
                },
            },
        );

        assert_error::<Field>(&ctx, "alias: { child }", ErrorType::Syntax);
    }

    #[test]
    fn fragment_spread() {
        let ctx = ASTContext::new();

        assert_parse(
            &ctx,
            "... FragName",
            FragmentSpread {
                name: NamedType { name: "FragName" },
                directives: Directives {
                    children: Vec::new_in(&ctx.arena),
                },
            },
        );

        assert_parse(
            &ctx,
            "...FragName @skip(if: $x)",
            FragmentSpread {
                name: NamedType { name: "FragName" },
                directives: Directives {
                    children: Vec::from_iter_in(
                        [Directive {
                            name: "skip",
                            arguments: Arguments {
                                children: Vec::from_iter_in(
                                    [Argument {
                                        name: "if",
                                        value: Value::Variable(Variable { name: "x" }),
                                    }],
                                    &ctx.arena,
                                ),
                            },
                        }],
                        &ctx.arena,
                    ),
                },
            },
        );

        assert_error::<FragmentSpread>(&ctx, "... on Type", ErrorType::Syntax);
    }

    #[test]
    fn inline_fragment() {
        let ctx = ASTContext::new();

        assert_parse(
            &ctx,
            "... on Type { field }",
            InlineFragment {
                type_condition: Some(TypeCondition {
                    named_type: NamedType { name: "Type" },
                }),
                directives: Directives {
                    children: Vec::new_in(&ctx.arena),
                },
                selection_set: SelectionSet {
                    selections: Vec::from_iter_in([leaf(&ctx, "field")], &ctx.arena),
                },
            },
        );

        assert_parse(
            &ctx,
            "... { field }",
            InlineFragment {
                type_condition: None,
                directives: Directives {
                    children: Vec::new_in(&ctx.arena),
                },
                selection_set: SelectionSet {
                    selections: Vec::from_iter_in([leaf(&ctx, "field")], &ctx.arena),
                },
            },
        );

        assert_error::<InlineFragment>(&ctx, "... on Type", ErrorType::UnexpectedEnd);
        assert_error::<InlineFragment>(&ctx, "... on { field }", ErrorType::Syntax);
    }

    #[test]
    fn selections() {
        let ctx = ASTContext::new();
        let set = SelectionSet::parse(
            &ctx,
            "{ a ...Spread ... on Type { b } ... @include(if: $c) { c } ...{ d } }",
        )
        .unwrap();
        assert_eq!(set.selections.len(), 5);
        assert_eq!(set.selections[0].field().unwrap().name, "a");
        assert_eq!(
            set.selections[1].fragment_spread().unwrap().name.name,
            "Spread"
        );

        let typed = set.selections[2].inline_fragment().unwrap();
        assert_eq!(typed.type_condition.unwrap().name(), "Type");
        assert_eq!(typed.selection_set.selections[0].field().unwrap().name, "b");

        let directed = set.selections[3].inline_fragment().unwrap();
        assert!(directed.type_condition.is_none());
        assert_eq!(directed.directives.children[0].name, "include");

        let bare = set.selections[4].inline_fragment().unwrap();
        assert!(bare.type_condition.is_none());
        assert!(bare.directives.is_empty());

        assert_error::<SelectionSet>(&ctx, "{ ... }", ErrorType::Syntax);
        assert_error::<SelectionSet>(&ctx, "{ a b", ErrorType::UnexpectedEnd);
        assert_error::<SelectionSet>(&ctx, "a b }", ErrorType::Syntax);
    }

    #[test]
    fn types() {
        let ctx = ASTContext::new();
        assert_parse(&ctx, "Type", Type::NamedType(NamedType { name: "Type" }));
        assert_parse(
            &ctx,
            "[Type!]!",
            Type::NonNullType(&Type::ListType(&Type::NonNullType(&Type::NamedType(
                NamedType { name: "Type" },
            )))),
        );
        assert_error::<Type>(&ctx, "[Type", ErrorType::UnexpectedEnd);
        assert_error::<Type>(&ctx, "!", ErrorType::Syntax);
    }

    #[test]
    fn var_definitions() {
        let ctx = ASTContext::new();
        assert_parse(
            &ctx,
            "($x: Int = null, $site: Site! = MOBILE @deprecated, $names: [String])",
            VariableDefinitions {
                children: Vec::from_iter_in(
                    [
                        VariableDefinition {
                            variable: Variable { name: "x" },
                            of_type: Type::NamedType(NamedType { name: "Int" }),
                            default_value: Some(Value::Null),
                            directives: Directives {
                                children: Vec::new_in(&ctx.arena),
                            },
                        },
                        VariableDefinition {
                            variable: Variable { name: "site" },
                            of_type: Type::NonNullType(&Type::NamedType(NamedType {
                                name: "Site",
                            })),
                            default_value: Some(Value::Enum(EnumValue { value: "MOBILE" })),
                            directives: Directives {
                                children: Vec::from_iter_in(
                                    [Directive {
                                        name: "deprecated",
                                        arguments: Arguments {
                                            children: Vec::new_in(&ctx.arena),
                                        },
                                    }],
                                    &ctx.arena,
                                ),
                            },
                        },
                        VariableDefinition {
                            variable: Variable { name: "names" },
                            of_type: Type::ListType(&Type::NamedType(NamedType {
                                name: "String",
                            })),
                            default_value: None,
                            directives: Directives {
                                children: Vec::new_in(&ctx.arena),
                            },
                        },
                    ],
                    &ctx.arena,
                ),
            },
        );

        assert_error::<VariableDefinitions>(&ctx, "()", ErrorType::Syntax);
        assert_error::<VariableDefinitions>(&ctx, "($x Int)", ErrorType::Syntax);
        assert_error::<VariableDefinitions>(&ctx, "($x: Int!!)", ErrorType::Syntax);
        assert_error::<VariableDefinitions>(&ctx, "($x: Int = $y)", ErrorType::Syntax);
        assert_error::<VariableDefinitions>(&ctx, "($x: Int = 1)", ErrorType::NotSupported);
    }

    #[test]
    fn fragment() {
        let ctx = ASTContext::new();
        assert_parse(
            &ctx,
            "fragment Test on Type @test { field }",
            FragmentDefinition {
                name: NamedType { name: "Test" },
                type_condition: TypeCondition {
                    named_type: NamedType { name: "Type" },
                },
                directives: Directives {
                    children: Vec::from_iter_in(
                        [Directive {
                            name: "test",
                            arguments: Arguments {
                                children: Vec::new_in(&ctx.arena),
                            },
                        }],
                        &ctx.arena,
                    ),
                },
                selection_set: SelectionSet {
                    selections: Vec::from_iter_in([leaf(&ctx, "field")], &ctx.arena),
                },
            },
        );

        let error = Document::parse(&ctx, "fragment on on Hero { name }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert_eq!(error.message(), "'on' is not a valid fragment name");

        assert_error::<FragmentDefinition>(&ctx, "fragment Test Type { a }", ErrorType::Syntax);
        assert_error::<FragmentDefinition>(&ctx, "fragment Test on Type", ErrorType::UnexpectedEnd);
    }

    #[test]
    fn operation() {
        let ctx = ASTContext::new();
        assert_parse(
            &ctx,
            "query Q($id: ID!) @live { a }",
            OperationDefinition {
                operation: OperationKind::Query,
                name: Some(NamedType { name: "Q" }),
                variable_definitions: VariableDefinitions {
                    children: Vec::from_iter_in(
                        [VariableDefinition {
                            variable: Variable { name: "id" },
                            of_type: Type::NonNullType(&Type::NamedType(NamedType { name: "ID" })),
                            default_value: None,
                            directives: Directives {
                                children: Vec::new_in(&ctx.arena),
                            },
                        }],
                        &ctx.arena,
                    ),
                },
                directives: Directives {
                    children: Vec::from_iter_in(
                        [Directive {
                            name: "live",
                            arguments: Arguments {
                                children: Vec::new_in(&ctx.arena),
                            },
                        }],
                        &ctx.arena,
                    ),
                },
                selection_set: SelectionSet {
                    selections: Vec::from_iter_in([leaf(&ctx, "a")], &ctx.arena),
                },
            },
        );

        let operation = OperationDefinition::parse(&ctx, "mutation { doThing }").unwrap();
        assert_eq!(operation.operation, OperationKind::Mutation);
        assert!(operation.name.is_none());

        let operation = OperationDefinition::parse(&ctx, "SUBSCRIPTION OnEvent { e }").unwrap();
        assert_eq!(operation.operation, OperationKind::Subscription);
        assert_eq!(operation.name.unwrap().name, "OnEvent");

        assert_error::<OperationDefinition>(&ctx, "query Q", ErrorType::UnexpectedEnd);
        assert_error::<OperationDefinition>(&ctx, "query Q a", ErrorType::Syntax);
    }

    #[test]
    fn anonymous_shorthand() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "{ a b c }").unwrap();
        assert_eq!(document.operations.len(), 1);
        let operation = &document.operations[""];
        assert_eq!(operation.operation, OperationKind::Query);
        assert!(operation.name.is_none());
        let names: std::vec::Vec<&str> = operation
            .selection_set
            .selections
            .iter()
            .map(|selection| selection.field().unwrap().name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn empty_selection_set_is_accepted() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "query { }").unwrap();
        assert!(document.operations[""].selection_set.is_empty());
    }

    #[test]
    fn nested_selections() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "query Q { hero { name friends { name } } }").unwrap();
        let operation = document.operation(Some("Q")).unwrap();
        assert_eq!(operation.operation, OperationKind::Query);
        assert_eq!(operation.selection_set.selections.len(), 1);

        let hero = operation.selection_set.selections[0].field().unwrap();
        assert_eq!(hero.name, "hero");
        let children = &hero.selection_set.selections;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].field().unwrap().name, "name");
        let friends = children[1].field().unwrap();
        assert_eq!(friends.name, "friends");
        assert_eq!(friends.selection_set.selections.len(), 1);
        assert_eq!(
            friends.selection_set.selections[0].field().unwrap().name,
            "name"
        );
    }

    #[test]
    fn fragments_and_spreads() {
        let ctx = ASTContext::new();
        let document = Document::parse(&ctx, "fragment F on Hero { name } query { ...F }").unwrap();

        let fragment = &document.fragments["F"];
        assert_eq!(fragment.type_condition.name(), "Hero");
        assert_eq!(fragment.selection_set.selections.len(), 1);
        assert_eq!(fragment.selection_set.selections[0].field().unwrap().name, "name");

        let operation = &document.operations[""];
        assert_eq!(operation.selection_set.selections.len(), 1);
        assert_eq!(
            operation.selection_set.selections[0]
                .fragment_spread()
                .unwrap()
                .name
                .name,
            "F"
        );
    }

    #[test]
    fn duplicate_definitions() {
        let ctx = ASTContext::new();

        let error = Document::parse(&ctx, "query Q { a } query Q { b }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert_eq!(error.message(), "duplicate operation name Q");
        assert_eq!(error.location(), &Some(Location { line: 1, column: 14 }));

        let error = Document::parse(&ctx, "{ a } { b }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert_eq!(error.message(), "duplicate anonymous operation");

        let error = Document::parse(&ctx, "{ a } query { b }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);

        let error =
            Document::parse(&ctx, "fragment F on A { a } fragment F on B { b }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert_eq!(error.message(), "duplicate fragment name F");

        let document = Document::parse(&ctx, "query F { a } fragment F on A { a }").unwrap();
        assert_eq!(document.operations.len(), 1);
        assert_eq!(document.fragments.len(), 1);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let ctx = ASTContext::new();
        let document =
            Document::parse(&ctx, "Query A { a } MUTATION B { b } FRAGMENT C on T { c }").unwrap();
        assert_eq!(document.operations["A"].operation, OperationKind::Query);
        assert_eq!(document.operations["B"].operation, OperationKind::Mutation);
        assert!(document.fragments.contains_key("C"));
    }

    #[test]
    fn ignored_tokens() {
        let ctx = ASTContext::new();
        let source = "# leading comment\r\n{\n  a, # trailing comment\n  b,,,c\r\n}\n# end";
        let document = Document::parse(&ctx, source).unwrap();
        assert_eq!(document.operations[""].selection_set.selections.len(), 3);
        assert_eq!(document.size_hint, source.len());
    }
}
