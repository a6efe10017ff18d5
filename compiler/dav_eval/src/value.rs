//! Runtime values.
//!
//! `Value` is a closed union: every operator and builtin matches on it
//! exhaustively and reports a typed failure for shapes it does not accept.
//! Lists and maps have reference semantics, so `add 1 to items` inside a
//! call mutates the caller's list.

use std::cell::{Ref, RefCell, RefMut};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use dav_vocab::{TypeKind, Vocabulary};

/// Single-threaded shared cell used by the container variants.
///
/// All container allocations go through [`Shared::new`], which keeps the
/// `Rc<RefCell<_>>` plumbing in one place.
#[repr(transparent)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same container.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => inner.fmt(f),
            Err(_) => f.write_str("<borrowed>"),
        }
    }
}

/// A runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(Rc<str>),
    Bool(bool),
    List(Shared<Vec<Value>>),
    Map(Shared<BTreeMap<String, Value>>),
    #[default]
    None,
}

impl Value {
    pub fn text(s: impl Into<Rc<str>>) -> Self {
        Value::Text(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Shared::new(items))
    }

    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Shared::new(entries))
    }

    /// The value a freshly declared variable of `kind` starts with.
    pub fn default_for(kind: Option<TypeKind>) -> Self {
        match kind {
            Some(TypeKind::Number) => Value::Int(0),
            Some(TypeKind::Text) => Value::text(""),
            Some(TypeKind::Boolean) => Value::Bool(false),
            Some(TypeKind::List) => Value::list(Vec::new()),
            Some(TypeKind::Map) => Value::map(BTreeMap::new()),
            None => Value::None,
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::None => "None",
        }
    }

    /// Condition coercion.
    ///
    /// Text is true when it is one of the vocabulary's truthy words, and
    /// otherwise when it is non-empty.
    pub fn is_truthy(&self, vocab: &Vocabulary) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => vocab.is_truthy_word(s) || !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Map(entries) => !entries.borrow().is_empty(),
            Value::None => false,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Ordering within one comparable family: numbers, text, booleans.
    ///
    /// `None` means the two values cannot be ordered.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => match (self.as_float(), other.as_float()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, nested: bool, seen: &mut Vec<*const ()>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::Text(s) if nested => write!(f, "\"{s}\""),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::None => f.write_str("None"),
            Value::List(items) => {
                if seen.contains(&items.addr()) {
                    return f.write_str("[...]");
                }
                seen.push(items.addr());
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write(f, true, seen)?;
                }
                seen.pop();
                f.write_str("]")
            }
            Value::Map(entries) => {
                if seen.contains(&entries.addr()) {
                    return f.write_str("{...}");
                }
                seen.push(entries.addr());
                f.write_str("{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{key}\": ")?;
                    value.write(f, true, seen)?;
                }
                seen.pop();
                f.write_str("}")
            }
        }
    }
}

/// Floats always show a fractional part: `2.0`, not `2`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, false, &mut Vec::new())
    }
}

/// Structural equality. Numbers compare across int and float; values of
/// unrelated types are simply unequal.
///
/// Containers already being compared higher up count as equal, so
/// self-containing lists compare in finite time.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut Vec::new())
    }
}

type AddrPair = (*const (), *const ());

impl Value {
    fn eq_in(&self, other: &Self, seen: &mut Vec<AddrPair>) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::List(a), Value::List(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let pair = (a.addr(), b.addr());
                if seen.contains(&pair) {
                    return true;
                }
                seen.push(pair);
                let (left, right) = (a.borrow(), b.borrow());
                let equal = left.len() == right.len()
                    && left.iter().zip(right.iter()).all(|(x, y)| x.eq_in(y, seen));
                seen.pop();
                equal
            }
            (Value::Map(a), Value::Map(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let pair = (a.addr(), b.addr());
                if seen.contains(&pair) {
                    return true;
                }
                seen.push(pair);
                let (left, right) = (a.borrow(), b.borrow());
                let equal = left.len() == right.len()
                    && left
                        .iter()
                        .zip(right.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.eq_in(vb, seen));
                seen.pop();
                equal
            }
            _ if self.is_number() && other.is_number() => self.as_float() == other.as_float(),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_formats() {
        assert_eq!(Value::Int(10).to_string(), "10");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::None.to_string(), "None");
        assert_eq!(Value::text("hi").to_string(), "hi");
        let list = Value::list(vec![Value::Int(1), Value::text("a"), Value::Float(0.5)]);
        assert_eq!(list.to_string(), "[1, \"a\", 0.5]");
    }

    #[test]
    fn self_containing_list_displays() {
        let inner = Shared::new(vec![Value::Int(1)]);
        let list = Value::List(inner.clone());
        inner.borrow_mut().push(list.clone());
        assert_eq!(list.to_string(), "[1, [...]]");
    }

    #[test]
    fn self_containing_lists_compare() {
        let cyclic = |head: i64| {
            let cell = Shared::new(vec![Value::Int(head)]);
            let list = Value::List(cell.clone());
            cell.borrow_mut().push(list.clone());
            list
        };
        assert_eq!(cyclic(1), cyclic(1));
        assert_ne!(cyclic(1), cyclic(2));
    }

    #[test]
    fn map_display() {
        let mut entries = BTreeMap::new();
        entries.insert("b".to_string(), Value::Int(2));
        entries.insert("a".to_string(), Value::text("x"));
        assert_eq!(Value::map(entries).to_string(), "{\"a\": \"x\", \"b\": 2}");
    }

    #[test]
    fn truthiness() {
        let vocab = Vocabulary::english();
        assert!(Value::Int(3).is_truthy(&vocab));
        assert!(!Value::Int(0).is_truthy(&vocab));
        assert!(!Value::Float(0.0).is_truthy(&vocab));
        assert!(Value::text("yes").is_truthy(&vocab));
        assert!(Value::text("anything").is_truthy(&vocab));
        assert!(!Value::text("").is_truthy(&vocab));
        assert!(!Value::list(vec![]).is_truthy(&vocab));
        assert!(Value::list(vec![Value::None]).is_truthy(&vocab));
        assert!(!Value::None.is_truthy(&vocab));
    }

    #[test]
    fn equality_and_ordering() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Int(1), Value::text("1"));
        assert_ne!(Value::Bool(false), Value::None);
        assert_eq!(
            Value::list(vec![Value::Int(1)]),
            Value::list(vec![Value::Float(1.0)])
        );
        assert_eq!(Value::Int(1).compare(&Value::Float(1.5)), Some(Ordering::Less));
        assert_eq!(
            Value::text("b").compare(&Value::text("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Int(1).compare(&Value::text("a")), None);
    }

    #[test]
    fn declared_defaults() {
        assert_eq!(Value::default_for(Some(TypeKind::Number)), Value::Int(0));
        assert_eq!(Value::default_for(Some(TypeKind::Text)), Value::text(""));
        assert_eq!(Value::default_for(Some(TypeKind::Boolean)), Value::Bool(false));
        assert_eq!(Value::default_for(Some(TypeKind::List)), Value::list(vec![]));
        assert_eq!(Value::default_for(None), Value::None);
    }
}
