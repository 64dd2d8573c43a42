//! Document structure used for ingestion and for stored results.

use serde::{Deserialize, Serialize};

/// A named text value on a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The field name.
    pub name: String,
    /// The raw text value.
    pub value: String,
}

impl Field {
    /// Create a new field.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A document is an ordered collection of text fields.
///
/// Field order is insertion order. The same name may appear more than once,
/// in which case the field is multi-valued: every value is analyzed into the
/// same indexed field, and every value is kept when the field is stored.
///
/// The stored part of an ingested document comes back as a `Document` too,
/// holding only the stored fields, in their original order.
///
/// # Examples
///
/// ```
/// use kopis::document::document::Document;
///
/// let doc = Document::builder()
///     .add_text("keyword", "heavy item")
///     .add_text("title", "Use small boxes for heavy items.")
///     .build();
///
/// assert_eq!(doc.get("keyword"), Some("heavy item"));
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    fields: Vec<Field>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Document { fields: Vec::new() }
    }

    /// Append a text field to the document.
    pub fn add_text<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.fields.push(Field::new(name, value));
    }

    /// Append a field to the document.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Get the first value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Get every value of a field, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    /// Get all fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get the number of fields (counting every value of multi-valued fields).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }
}

impl FromIterator<Field> for Document {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Document {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, value)| Field::new(name, value))
            .collect()
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder {
            document: Document::new(),
        }
    }

    /// Add a text field to the document.
    pub fn add_text<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.document.add_text(name, value);
        self
    }

    /// Build the final document.
    pub fn build(self) -> Document {
        self.document
    }
}
