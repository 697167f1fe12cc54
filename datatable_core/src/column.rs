use crate::filter::FilterVariant;
use crate::pinning::ColumnPin;
use serde::{Deserialize, Serialize};

/// One choice offered by Select and MultiSelect filter editors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Column metadata as declared by user code and communicated to the table
/// surface: display name, filter variant and rendering hints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub variant: FilterVariant,
    pub is_sortable: bool,
    pub is_filterable: bool,
    pub pin: ColumnPin,
    /// Fixed width in pixels. Pinned columns need one so edge offsets stay
    /// stable, unpinned columns are auto sized when absent.
    pub width: Option<f32>,
    pub options: Vec<SelectOption>,
}

impl ColumnSpec {
    pub fn new(name: impl AsRef<str>, variant: FilterVariant) -> Self {
        ColumnSpec {
            name: name.as_ref().to_string(),
            variant,
            is_sortable: true,
            is_filterable: true,
            pin: ColumnPin::None,
            width: None,
            options: vec![],
        }
    }

    pub fn text(name: impl AsRef<str>) -> Self {
        Self::new(name, FilterVariant::Text)
    }

    pub fn number(name: impl AsRef<str>) -> Self {
        Self::new(name, FilterVariant::Number)
    }

    pub fn date(name: impl AsRef<str>) -> Self {
        Self::new(name, FilterVariant::Date)
    }

    pub fn boolean(name: impl AsRef<str>) -> Self {
        Self::new(name, FilterVariant::Boolean)
    }

    pub fn select<'a>(
        name: impl AsRef<str>,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self::new(name, FilterVariant::Select).options(options)
    }

    pub fn multi_select<'a>(
        name: impl AsRef<str>,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self::new(name, FilterVariant::MultiSelect).options(options)
    }

    pub fn options<'a>(mut self, options: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.options = options
            .into_iter()
            .map(|(label, value)| SelectOption {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect();
        self
    }

    pub fn pinned(mut self, pin: ColumnPin) -> Self {
        self.pin = pin;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn sortable(mut self, is_sortable: bool) -> Self {
        self.is_sortable = is_sortable;
        self
    }

    pub fn filterable(mut self, is_filterable: bool) -> Self {
        self.is_filterable = is_filterable;
        self
    }
}
