//! Boolean layer filters.
//!
//! A [`Filter`] decides which features of the source a layer draws. It can be
//! evaluated locally against a [`LiteraryFeature`] or serialised into the
//! expression arrays the rendering collaborator consumes, e.g.
//! `["all", ["has", "topics"], ["in", ["get", "LocationName"], ["literal", [..]]]]`.

use crate::core::constants::{LOCATION_PROPERTY, TOPICS_PROPERTY};
use crate::data::feature::{Category, FlagField, LiteraryFeature, Theme};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every feature
    Always,
    /// Matches no feature
    Never,
    /// Every child matches; an empty list matches everything
    All(Vec<Filter>),
    /// Some child matches; an empty list matches nothing
    Any(Vec<Filter>),
    /// The feature carries a `topics` property
    HasTopics,
    LocationEq(String),
    /// The feature's location is one of the listed names
    LocationIn(Vec<String>),
    /// `expect == true`: flag is set. `expect == false`: flag is anything but set.
    Flag {
        field: FlagField,
        key: String,
        expect: bool,
    },
}

impl Filter {
    pub fn location_eq(location: impl Into<String>) -> Self {
        Filter::LocationEq(location.into())
    }

    pub fn location_in<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::LocationIn(locations.into_iter().map(Into::into).collect())
    }

    pub fn topic(category: Category, expect: bool) -> Self {
        Filter::Flag {
            field: FlagField::Topics,
            key: category.as_str().to_string(),
            expect,
        }
    }

    pub fn theme(theme: Theme, expect: bool) -> Self {
        Filter::Flag {
            field: FlagField::Themes,
            key: theme.as_str().to_string(),
            expect,
        }
    }

    pub fn evaluate(&self, feature: &LiteraryFeature) -> bool {
        match self {
            Filter::Always => true,
            Filter::Never => false,
            Filter::All(children) => children.iter().all(|c| c.evaluate(feature)),
            Filter::Any(children) => children.iter().any(|c| c.evaluate(feature)),
            Filter::HasTopics => feature.has_topics,
            Filter::LocationEq(location) => feature.location_name() == Some(location.as_str()),
            Filter::LocationIn(locations) => feature
                .location_name()
                .is_some_and(|name| locations.iter().any(|l| l == name)),
            Filter::Flag { field, key, expect } => feature.flags(*field).is_set(key) == *expect,
        }
    }

    /// Collaborator expression for this filter
    pub fn to_expression(&self) -> Value {
        match self {
            Filter::Always => json!(["literal", true]),
            Filter::Never => json!(["literal", false]),
            Filter::All(children) => Self::combine("all", children),
            Filter::Any(children) => Self::combine("any", children),
            Filter::HasTopics => json!(["has", TOPICS_PROPERTY]),
            Filter::LocationEq(location) => {
                json!(["==", ["get", LOCATION_PROPERTY], location])
            }
            Filter::LocationIn(locations) => {
                json!(["in", ["get", LOCATION_PROPERTY], ["literal", locations]])
            }
            Filter::Flag { field, key, expect } => {
                let op = if *expect { "==" } else { "!=" };
                json!([
                    op,
                    [
                        "get",
                        key,
                        ["coalesce", ["object", ["get", field.property()]], ["literal", {}]]
                    ],
                    true
                ])
            }
        }
    }

    fn combine(op: &str, children: &[Filter]) -> Value {
        let mut expr = vec![Value::from(op)];
        expr.extend(children.iter().map(Filter::to_expression));
        Value::Array(expr)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_expression().serialize(serializer)
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_expression())
    }
}
