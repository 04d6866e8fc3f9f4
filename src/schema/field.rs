/// The constraint a single field places on its value.
///
/// Checks run in a fixed order: the JSON type first, then length or range
/// bounds, then vocabulary membership, then nested records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A string, optionally bounded in characters.
    Text {
        /// Minimum number of characters, if any.
        min: Option<usize>,
        /// Maximum number of characters, if any.
        max: Option<usize>,
    },
    /// A whole number, optionally bounded.
    Integer {
        /// Smallest accepted value, if any.
        min: Option<i64>,
        /// Largest accepted value, if any.
        max: Option<i64>,
    },
    /// A point in time.
    Timestamp,
    /// A string drawn from a closed vocabulary.
    Vocabulary(&'static [&'static str]),
    /// A list of [`Keyword`](crate::Keyword)s.
    Keywords,
    /// A list of floating point numbers.
    Numbers,
    /// A nested value object.
    Object(&'static Schema),
    /// A list of nested value objects.
    Objects(&'static Schema),
}

impl Kind {
    /// A string with no length bounds.
    pub const TEXT: Self = Self::Text {
        min: None,
        max: None,
    };

    /// A string of `min..=max` characters.
    #[must_use]
    pub const fn text(min: usize, max: usize) -> Self {
        Self::Text {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A string of at most `max` characters.
    #[must_use]
    pub const fn text_up_to(max: usize) -> Self {
        Self::Text {
            min: None,
            max: Some(max),
        }
    }

    /// A whole number that is zero or greater.
    #[must_use]
    pub const fn non_negative() -> Self {
        Self::Integer {
            min: Some(0),
            max: None,
        }
    }

    /// A whole number in `min..=max`.
    #[must_use]
    pub const fn integer(min: i64, max: i64) -> Self {
        Self::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// The name of the JSON type this kind expects.
    #[must_use]
    pub const fn expected_type(&self) -> &'static str {
        match self {
            Self::Text { .. } | Self::Vocabulary(_) => "string",
            Self::Integer { .. } => "integer",
            Self::Timestamp => "timestamp",
            Self::Keywords | Self::Numbers | Self::Objects(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

/// A declared field of a record.
///
/// Every field has an internal name, used by application logic, and an alias,
/// used on the wire and in the document store. The two are often identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// The internal field name.
    pub name: &'static str,
    /// The external (wire) key.
    pub alias: &'static str,
    /// Whether the field must be present.
    pub required: bool,
    /// The constraint on the field's value.
    pub kind: Kind,
}

impl Field {
    /// A required field whose alias matches its name.
    #[must_use]
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            alias: name,
            required: true,
            kind,
        }
    }

    /// An optional field whose alias matches its name.
    #[must_use]
    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            alias: name,
            required: false,
            kind,
        }
    }

    /// Sets the external alias of the field.
    #[must_use]
    pub const fn alias(self, alias: &'static str) -> Self {
        Self {
            name: self.name,
            alias,
            required: self.required,
            kind: self.kind,
        }
    }

    /// Returns the key used for this field under the given convention.
    #[must_use]
    pub const fn key(&self, keying: Keying) -> &'static str {
        match keying {
            Keying::Internal => self.name,
            Keying::Alias => self.alias,
        }
    }
}

/// The ordered field table of one record type.
///
/// This is also the record's bidirectional rename table: [`Schema::alias_of`]
/// and [`Schema::name_of`] translate between the two key conventions.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    /// The record type name, used in reports and logs.
    pub entity: &'static str,
    /// The document store collection holding this record, if it is a root
    /// entity.
    pub collection: Option<&'static str>,
    /// The declared fields, in serialization order.
    pub fields: &'static [Field],
}

impl Schema {
    /// Looks up a field by its internal name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Looks up a field by either its internal name or its alias.
    ///
    /// Aliases take precedence.
    #[must_use]
    pub fn field_by_key(&self, key: &str) -> Option<&'static Field> {
        self.fields
            .iter()
            .find(|field| field.alias == key)
            .or_else(|| self.field(key))
    }

    /// The alias of the field with the given internal name.
    #[must_use]
    pub fn alias_of(&self, name: &str) -> Option<&'static str> {
        self.field(name).map(|field| field.alias)
    }

    /// The internal name of the field with the given alias.
    #[must_use]
    pub fn name_of(&self, alias: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|field| field.alias == alias)
            .map(|field| field.name)
    }

    /// Iterates over the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter().filter(|field| field.required)
    }
}

/// The key convention used when reading or writing a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keying {
    /// Keys are the external aliases used by storage and API consumers.
    #[default]
    Alias,
    /// Keys are the internal field names.
    Internal,
}

impl std::fmt::Display for Keying {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alias => f.write_str("alias"),
            Self::Internal => f.write_str("internal"),
        }
    }
}
