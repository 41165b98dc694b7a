use crate::ast::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

impl<'a> Serialize for Value<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Value::Variable(variable) => {
                map.serialize_entry("type", "variable")?;
                map.serialize_entry("variable", variable.name)?;
            }
            Value::String(string) => {
                map.serialize_entry("type", "string_value")?;
                map.serialize_entry("value", string.value)?;
            }
            Value::Boolean(boolean) => {
                map.serialize_entry("type", "bool_value")?;
                map.serialize_entry("value", &boolean.value)?;
            }
            Value::Enum(value) => {
                map.serialize_entry("type", "enum_value")?;
                map.serialize_entry("value", value.value)?;
            }
            Value::Null => map.serialize_entry("type", "null_value")?,
        }
        map.end()
    }
}

impl<'a> Serialize for Variable<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(*self).serialize(serializer)
    }
}

impl<'a> Serialize for StringValue<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(*self).serialize(serializer)
    }
}

impl<'a> Serialize for EnumValue<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(*self).serialize(serializer)
    }
}

impl Serialize for BooleanValue {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(*self).serialize(serializer)
    }
}

/// A single Argument exports as an object with one key.
impl<'a> Serialize for Argument<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, &self.value)?;
        map.end()
    }
}

impl<'a> Serialize for Arguments<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.children
                .iter()
                .map(|argument| (argument.name, &argument.value)),
        )
    }
}

impl<'a> Serialize for Directive<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", self.name)?;
        if !self.arguments.is_empty() {
            map.serialize_entry("arguments", &self.arguments)?;
        }
        map.end()
    }
}

impl<'a> Serialize for Directives<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.children.iter())
    }
}

impl<'a> Serialize for NamedType<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Type conditions export as the bare name of the type they apply to.
impl<'a> Serialize for TypeCondition<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Type references export as their printed GraphQL form, e.g. `"[ID!]!"`.
impl<'a> Serialize for Type<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.print())
    }
}

impl<'a> Serialize for Field<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "field")?;
        map.serialize_entry("name", self.name)?;
        if let Some(alias) = self.alias {
            map.serialize_entry("alias", alias)?;
        }
        if !self.arguments.is_empty() {
            map.serialize_entry("arguments", &self.arguments)?;
        }
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        if !self.selection_set.is_empty() {
            map.serialize_entry("selection_set", &self.selection_set)?;
        }
        map.end()
    }
}

impl<'a> Serialize for FragmentSpread<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "fragment_spread")?;
        map.serialize_entry("name", &self.name)?;
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        map.end()
    }
}

impl<'a> Serialize for InlineFragment<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "inline_fragment")?;
        if let Some(type_condition) = &self.type_condition {
            map.serialize_entry("type_condition", type_condition)?;
        }
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        map.serialize_entry("selection_set", &self.selection_set)?;
        map.end()
    }
}

impl<'a> Serialize for Selection<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::Field(field) => field.serialize(serializer),
            Selection::FragmentSpread(spread) => spread.serialize(serializer),
            Selection::InlineFragment(fragment) => fragment.serialize(serializer),
        }
    }
}

impl<'a> Serialize for SelectionSet<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.selections.iter())
    }
}

impl<'a> Serialize for VariableDefinition<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("variable", self.variable.name)?;
        map.serialize_entry("of_type", &self.of_type)?;
        if let Some(default_value) = &self.default_value {
            map.serialize_entry("default_value", default_value)?;
        }
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        map.end()
    }
}

impl<'a> Serialize for VariableDefinitions<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.children.iter())
    }
}

impl Serialize for OperationKind {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Operations are tagged with their kind, `query`, `mutation`, or `subscription`.
impl<'a> Serialize for OperationDefinition<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.operation)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        if !self.variable_definitions.is_empty() {
            map.serialize_entry("variable_definitions", &self.variable_definitions)?;
        }
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        map.serialize_entry("selection_set", &self.selection_set)?;
        map.end()
    }
}

/// Fragment definitions carry no `type` tag.
impl<'a> Serialize for FragmentDefinition<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type_condition", &self.type_condition)?;
        if !self.directives.is_empty() {
            map.serialize_entry("directives", &self.directives)?;
        }
        map.serialize_entry("selection_set", &self.selection_set)?;
        map.end()
    }
}

impl<'a> Serialize for Definition<'a> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Definition::Operation(operation) => operation.serialize(serializer),
            Definition::Fragment(fragment) => fragment.serialize(serializer),
        }
    }
}

/// Definitions keyed by name, serialized in the order they're given in.
struct Keyed<'b, T>(std::vec::Vec<(&'b str, &'b T)>);

impl<'b, T: Serialize> Serialize for Keyed<'b, T> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().copied())
    }
}

impl<'a> Serialize for Document<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let operations = self
            .sorted_operations()
            .into_iter()
            .map(|operation| (operation.key(), operation))
            .collect();
        map.serialize_entry("operations", &Keyed(operations))?;
        if !self.fragments.is_empty() {
            let fragments = self
                .sorted_fragments()
                .into_iter()
                .map(|fragment| (fragment.name.name, fragment))
                .collect();
            map.serialize_entry("fragments", &Keyed(fragments))?;
        }
        map.end()
    }
}
