use crate::log::{error_data, Error};
use serde::Serialize;
use serde_json::{to_value, Map, Value};

/// The key that refers to the current scope itself.
pub const THIS: &str = "this";

/// Provides storage for named data that a document can be filled with.
///
/// A [`Store`] is a convenient way to build the top level object of the data,
/// each inserted value is serialized with `serde_json`.
#[derive(Debug, Default, Clone)]
pub struct Store {
    data: Map<String, Value>,
}

impl Store {
    /// Create a new [`Store`].
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlfill::Store;
    ///
    /// let store = Store::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self { data: Map::new() }
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlfill::Store;
    ///
    /// let mut store = Store::new();
    /// let result = store.insert("Name", "Maria");
    ///
    /// assert!(result.is_ok());
    /// ```
    pub fn insert<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        let value = to_value(value).map_err(error_data)?;
        self.data.insert(key.into(), value);

        Ok(())
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    #[inline]
    pub fn insert_must<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Serialize,
    {
        self.data.insert(
            key.into(),
            to_value(value).expect("value should be serializable"),
        );
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// Returns the `Store`, so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    #[inline]
    pub fn with<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert(key, value)?;

        Ok(self)
    }

    /// Inserts a key-value pair into the [`Store`].
    ///
    /// Returns the `Store`, so additional methods may be chained.
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlfill::Store;
    ///
    /// let store = Store::new()
    ///     .with_must("Name", "Maria")
    ///     .with_must("Year", 2);
    ///
    /// assert_eq!(store.get("Year").unwrap(), 2);
    /// ```
    #[inline]
    pub fn with_must<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert_must(key, value);

        self
    }

    /// Returns a reference to the [`Value`] corresponding to the key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Convert the [`Store`] into an object [`Value`].
    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}

impl From<Store> for Value {
    fn from(value: Store) -> Self {
        value.into_value()
    }
}

/// A stack of data values that placeholders are resolved against.
///
/// The bottom frame is the data handed to the filler, every block pushes
/// the item it is currently expanding.
#[derive(Debug)]
pub struct Scope<'data> {
    frames: Vec<&'data Value>,
}

impl<'data> Scope<'data> {
    /// Create a new [`Scope`] over the given root value.
    #[inline]
    pub fn new(root: &'data Value) -> Self {
        Self { frames: vec![root] }
    }

    /// Push a new frame onto the [`Scope`].
    #[inline]
    pub fn push(&mut self, value: &'data Value) {
        self.frames.push(value);
    }

    /// Remove the top frame from the [`Scope`].
    ///
    /// # Panics
    ///
    /// Panics if only the root frame is left.
    #[inline]
    pub fn pop(&mut self) {
        if self.frames.len() == 1 {
            panic!("last scope must never be removed");
        }
        self.frames.pop();
    }

    /// Return the innermost frame.
    #[inline]
    pub fn current(&self) -> &'data Value {
        self.frames[self.frames.len() - 1]
    }

    /// Return the number of frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolve a chain of keys.
    ///
    /// A chain beginning with [`THIS`] starts at the innermost frame.
    /// Otherwise the first key is searched from the innermost frame
    /// outwards, and each following key is looked up in the value found
    /// so far. Keys made of digits index into arrays.
    pub fn lookup(&self, keys: &[String]) -> Option<&'data Value> {
        let (first, rest) = keys.split_first()?;
        let base = if first == THIS {
            Some(self.current())
        } else {
            self.frames
                .iter()
                .rev()
                .find_map(|frame| frame.as_object().and_then(|o| o.get(first)))
        };

        rest.iter().try_fold(base?, |value, key| step(value, key))
    }
}

/// Look up a single key within a value.
fn step<'data>(value: &'data Value, key: &str) -> Option<&'data Value> {
    match value {
        Value::Object(object) => object.get(key),
        Value::Array(array) => key.parse::<usize>().ok().and_then(|i| array.get(i)),
        _ => None,
    }
}
