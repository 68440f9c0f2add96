//! The JSON abstract syntax tree.
//!
//! A [`Value`] is a closed enum over the seven JSON variants. Trees are built
//! bottom-up, either by the parser or by hand through the constructors below,
//! and cannot be modified afterwards: [`Array`] and [`Object`] only expose
//! read access to the children they own.
//!
//! Objects keep their members in insertion order and keep duplicate names;
//! [`Object::get`] returns the first member with a given name.

use std::ops::Index;
use std::slice;
use std::str::FromStr;

use crate::error::JsonError;
use crate::number::{Decimal, Number};

/// A node of the JSON tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
    Array(Array),
    Object(Object),
}

/// An ordered, read-only sequence of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Value>,
}

/// An ordered, read-only sequence of members. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    members: Vec<Member>,
}

/// A name/value pair inside an [`Object`].
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    name: String,
    value: Value,
}

// ----------------------------------------------------------------------------
// Value

impl Value {
    /// A string value.
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// An integer value.
    pub fn integer(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }

    /// A decimal value, printed with its own scale.
    pub fn decimal(value: Decimal) -> Self {
        Value::Number(Number::Decimal(value))
    }

    /// A number of either kind.
    pub fn number(value: impl Into<Number>) -> Self {
        Value::Number(value.into())
    }

    /// `true` or `false`.
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// `null`.
    pub fn null() -> Self {
        Value::Null
    }

    /// An array of `items` in iteration order.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Array::new(items))
    }

    /// An object of `members` in iteration order; duplicate names are kept.
    pub fn object(members: impl IntoIterator<Item = Member>) -> Self {
        Value::Object(Object::new(members))
    }

    /// Short lowercase name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl FromStr for Value {
    type Err = JsonError;

    /// Parse a document; see [`crate::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::integer(i64::from(value))
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::decimal(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array { items })
    }
}

impl From<Vec<Member>> for Value {
    fn from(members: Vec<Member>) -> Self {
        Value::Object(Object { members })
    }
}

// ----------------------------------------------------------------------------
// Array

impl Array {
    pub fn new(items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ----------------------------------------------------------------------------
// Object

impl Object {
    pub fn new(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in source order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn iter(&self) -> slice::Iter<'_, Member> {
        self.members.iter()
    }

    /// Value of the first member called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|member| member.name == name)
            .map(Member::value)
    }

    /// Values of every member called `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.members
            .iter()
            .filter(move |member| member.name == name)
            .map(Member::value)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.members.iter().any(|member| member.name == name)
    }
}

impl Index<usize> for Object {
    type Output = Member;

    fn index(&self, index: usize) -> &Member {
        &self.members[index]
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a Member;
    type IntoIter = slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl IntoIterator for Object {
    type Item = Member;
    type IntoIter = std::vec::IntoIter<Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl FromIterator<Member> for Object {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ----------------------------------------------------------------------------
// Member

impl Member {
    /// A name/value pair.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

impl<N: Into<String>, V: Into<Value>> From<(N, V)> for Member {
    fn from((name, value): (N, V)) -> Self {
        Member::new(name, value)
    }
}
