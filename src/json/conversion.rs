use crate::ast::*;
use serde_json::Value as JSValue;

/// Trait for exporting AST Nodes of a GraphQL language document to tagged [serde_json::Value]s.
///
/// Selections and values are objects carrying a `"type"` discriminator, such as `"field"`,
/// `"inline_fragment"`, or `"enum_value"`. Optional parts that are absent or empty are omitted.
pub trait ToJson {
    /// Export the current AST Node to a [serde_json::Value].
    fn to_json(&self) -> JSValue;

    /// Export the current AST Node to a compact JSON string.
    fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

macro_rules! to_json {
    ($($node:ty),+) => {
        $(
            impl<'a> ToJson for $node {
                #[inline]
                fn to_json(&self) -> JSValue {
                    // Every map key that's exported is a string, so conversion can't fail.
                    serde_json::to_value(self).unwrap_or(JSValue::Null)
                }
            }
        )+
    };
}

to_json!(
    Value<'a>,
    Variable<'a>,
    StringValue<'a>,
    EnumValue<'a>,
    BooleanValue,
    Argument<'a>,
    Arguments<'a>,
    Directive<'a>,
    Directives<'a>,
    NamedType<'a>,
    TypeCondition<'a>,
    Type<'a>,
    Field<'a>,
    FragmentSpread<'a>,
    InlineFragment<'a>,
    Selection<'a>,
    SelectionSet<'a>,
    VariableDefinition<'a>,
    VariableDefinitions<'a>,
    OperationKind,
    OperationDefinition<'a>,
    FragmentDefinition<'a>,
    Definition<'a>,
    Document<'a>
);

/// Convert an AST Value Node to a plain [serde_json::Value] without type tags, filling in
/// variables from the given [Variables].
///
/// Enum values convert to strings, and variables that aren't found convert to `null`.
pub fn value_from_ast<'a>(value: &Value<'a>, variables: Option<&Variables<'a>>) -> JSValue {
    match value {
        Value::Variable(variable) => variables
            .and_then(|vars| vars.get(variable.name))
            .map_or(JSValue::Null, |value| value_from_ast(value, None)),
        Value::String(string) => string.value.into(),
        Value::Enum(value) => value.value.into(),
        Value::Boolean(boolean) => boolean.value.into(),
        Value::Null => JSValue::Null,
    }
}
