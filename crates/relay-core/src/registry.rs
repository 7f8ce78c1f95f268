//! Tool descriptors and argument validation
//!
//! A [`ToolDescriptor`] declares a tool's name, description and input
//! contract. The [`ToolRegistry`] holds the descriptors in registration
//! order and checks incoming arguments against them before any handler
//! runs.

use serde_json::{Map, Value, json};

use crate::{Error, Result};

/// Arguments of a tool call, keyed by field name
pub type Arguments = Map<String, Value>;

/// Primitive type accepted for a tool field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Integer,
    Number,
    Object,
    Array,
}

impl FieldKind {
    /// JSON Schema type name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }

    /// Whether `value` is of this kind
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
        }
    }
}

/// One field of a tool's input contract
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub description: String,
    pub default: Option<Value>,
}

impl FieldSpec {
    /// A required field
    pub fn required(name: impl Into<String>, kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            description: description.into(),
            default: None,
        }
    }

    /// An optional field
    pub fn optional(name: impl Into<String>, kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    /// Attach a documented default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Declaration of a callable tool
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldSpec>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field to the input contract
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Render the input contract as a JSON Schema object
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut prop = json!({
                "type": field.kind.as_str(),
                "description": field.description,
            });
            if let Some(default) = &field.default {
                prop["default"] = default.clone();
            }
            properties.insert(field.name.clone(), prop);
        }

        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    /// Check `arguments` against the input contract
    pub fn check(&self, arguments: &Arguments) -> Result<()> {
        for field in &self.fields {
            match arguments.get(&field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(Error::invalid_argument(&field.name, "is required"));
                }
                None | Some(Value::Null) => {}
                Some(value) if !field.kind.accepts(value) => {
                    return Err(Error::invalid_argument(
                        &field.name,
                        format!("must be of type {}", field.kind.as_str()),
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Ordered set of tool descriptors with unique names
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, rejecting duplicate names
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        if self.get(&descriptor.name).is_some() {
            return Err(Error::DuplicateTool(descriptor.name));
        }
        self.tools.push(descriptor);
        Ok(())
    }

    /// All descriptors in registration order
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Validate a call against the named tool's contract
    pub fn validate(&self, name: &str, arguments: &Arguments) -> Result<()> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        descriptor.check(arguments)
    }
}
