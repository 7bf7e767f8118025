//! Static relational schema of the dataset
//!
//! Describes which attributes and relations each entity exposes so that
//! field paths like `blog.author.country.code` can be resolved before any
//! row is touched.

use std::fmt;
use super::value::FieldType;

/// The four tables of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    View,
    Blog,
    User,
    Country,
}

/// How many target rows a relation yields per source row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Required foreign key
    One,
    /// Nullable foreign key
    Optional,
    /// Reverse foreign key (one-to-many)
    Many,
}

/// A directly stored attribute
#[derive(Debug, PartialEq)]
pub struct Attribute {
    pub name: &'static str,
    pub data_type: FieldType,
}

/// A named relation from one entity to another
#[derive(Debug, PartialEq)]
pub struct Relation {
    pub name: &'static str,
    pub target: Entity,
    pub cardinality: Cardinality,
}

const fn attr(name: &'static str, data_type: FieldType) -> Attribute {
    Attribute { name, data_type }
}

const fn rel(name: &'static str, target: Entity, cardinality: Cardinality) -> Relation {
    Relation { name, target, cardinality }
}

static VIEW_ATTRIBUTES: [Attribute; 6] = [
    attr("id", FieldType::Int),
    attr("viewed_at", FieldType::Timestamp),
    attr("ip_address", FieldType::Text),
    attr("blog_id", FieldType::Int),
    attr("viewer_id", FieldType::Int),
    attr("country_id", FieldType::Int),
];

static VIEW_RELATIONS: [Relation; 3] = [
    rel("blog", Entity::Blog, Cardinality::One),
    rel("viewer", Entity::User, Cardinality::Optional),
    rel("country", Entity::Country, Cardinality::Optional),
];

static BLOG_ATTRIBUTES: [Attribute; 8] = [
    attr("id", FieldType::Int),
    attr("title", FieldType::Text),
    attr("content", FieldType::Text),
    attr("created_at", FieldType::Timestamp),
    attr("updated_at", FieldType::Timestamp),
    attr("is_published", FieldType::Bool),
    attr("author_id", FieldType::Int),
    attr("country_id", FieldType::Int),
];

static BLOG_RELATIONS: [Relation; 3] = [
    rel("author", Entity::User, Cardinality::One),
    rel("country", Entity::Country, Cardinality::Optional),
    rel("views", Entity::View, Cardinality::Many),
];

static USER_ATTRIBUTES: [Attribute; 9] = [
    attr("id", FieldType::Int),
    attr("username", FieldType::Text),
    attr("email", FieldType::Text),
    attr("first_name", FieldType::Text),
    attr("last_name", FieldType::Text),
    attr("bio", FieldType::Text),
    attr("is_active", FieldType::Bool),
    attr("created_at", FieldType::Timestamp),
    attr("country_id", FieldType::Int),
];

static USER_RELATIONS: [Relation; 3] = [
    rel("country", Entity::Country, Cardinality::Optional),
    rel("blogs", Entity::Blog, Cardinality::Many),
    rel("viewed_blogs", Entity::View, Cardinality::Many),
];

static COUNTRY_ATTRIBUTES: [Attribute; 3] = [
    attr("id", FieldType::Int),
    attr("name", FieldType::Text),
    attr("code", FieldType::Text),
];

static COUNTRY_RELATIONS: [Relation; 3] = [
    rel("users", Entity::User, Cardinality::Many),
    rel("blogs", Entity::Blog, Cardinality::Many),
    rel("blog_views", Entity::View, Cardinality::Many),
];

impl Entity {
    pub fn attributes(&self) -> &'static [Attribute] {
        match self {
            Entity::View => &VIEW_ATTRIBUTES,
            Entity::Blog => &BLOG_ATTRIBUTES,
            Entity::User => &USER_ATTRIBUTES,
            Entity::Country => &COUNTRY_ATTRIBUTES,
        }
    }

    pub fn relations(&self) -> &'static [Relation] {
        match self {
            Entity::View => &VIEW_RELATIONS,
            Entity::Blog => &BLOG_RELATIONS,
            Entity::User => &USER_RELATIONS,
            Entity::Country => &COUNTRY_RELATIONS,
        }
    }

    /// Get an attribute by name
    pub fn get_attribute(&self, name: &str) -> Option<&'static Attribute> {
        self.attributes().iter().find(|a| a.name == name)
    }

    /// Get a relation by name
    pub fn get_relation(&self, name: &str) -> Option<&'static Relation> {
        self.relations().iter().find(|r| r.name == name)
    }

    /// The primary key attribute
    pub fn id_attribute(&self) -> &'static Attribute {
        &self.attributes()[0]
    }

    /// All attribute and relation names, for error messages
    fn choices(&self) -> String {
        let mut names: Vec<&str> = self.attributes().iter().map(|a| a.name).collect();
        names.extend(self.relations().iter().map(|r| r.name));
        names.sort_unstable();
        names.join(", ")
    }

    /// Resolve a field path relative to this entity.
    ///
    /// Segments are separated by `.`; the `__` separator is accepted too.
    /// Every segment but the last must name a relation. A path ending in a
    /// relation refers to the related row's `id`.
    pub fn resolve_path(&self, path: &str) -> Result<FieldRef, PathError> {
        let segments = split_path(path);
        if segments.iter().all(|s| s.is_empty()) {
            return Err(PathError::Empty);
        }

        let mut entity = *self;
        let mut hops = Vec::new();
        let last = segments.len() - 1;

        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment(path.to_string()));
            }

            if i == last {
                if let Some(attribute) = entity.get_attribute(segment) {
                    return Ok(FieldRef {
                        path: path.to_string(),
                        hops,
                        attribute,
                    });
                }
            }

            match entity.get_relation(segment) {
                Some(relation) => {
                    hops.push(relation);
                    entity = relation.target;
                }
                None if entity.get_attribute(segment).is_some() => {
                    return Err(PathError::NotARelation {
                        path: path.to_string(),
                        attribute: segment.to_string(),
                    });
                }
                None => {
                    return Err(PathError::UnknownField {
                        entity,
                        segment: segment.to_string(),
                        choices: entity.choices(),
                    });
                }
            }
        }

        // Path ended on a relation: compare the related row's key
        Ok(FieldRef {
            path: path.to_string(),
            hops,
            attribute: entity.id_attribute(),
        })
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::View => write!(f, "view"),
            Entity::Blog => write!(f, "blog"),
            Entity::User => write!(f, "user"),
            Entity::Country => write!(f, "country"),
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split("__").flat_map(|part| part.split('.')).collect()
}

/// A field path resolved against the schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRef {
    /// The path as written by the caller
    pub path: String,
    /// Relations to traverse from the root row, in order
    pub hops: Vec<&'static Relation>,
    /// The attribute read at the end of the traversal
    pub attribute: &'static Attribute,
}

impl FieldRef {
    pub fn data_type(&self) -> FieldType {
        self.attribute.data_type
    }

    /// Whether the traversal can fan out into several rows
    pub fn is_multi_valued(&self) -> bool {
        self.hops.iter().any(|h| h.cardinality == Cardinality::Many)
    }
}

/// Errors raised while resolving a field path
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path '{0}' contains an empty segment")]
    EmptySegment(String),
    #[error("cannot resolve '{segment}' into a field of {entity}; choices are: {choices}")]
    UnknownField {
        entity: Entity,
        segment: String,
        choices: String,
    },
    #[error("'{attribute}' in '{path}' is an attribute and cannot be traversed")]
    NotARelation { path: String, attribute: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direct_attribute() {
        let field = Entity::View.resolve_path("viewed_at").unwrap();
        assert!(field.hops.is_empty());
        assert_eq!(field.attribute.name, "viewed_at");
        assert_eq!(field.data_type(), FieldType::Timestamp);
    }

    #[test]
    fn test_resolve_nested_relation() {
        let field = Entity::View.resolve_path("blog.author.country.code").unwrap();
        let hops: Vec<&str> = field.hops.iter().map(|h| h.name).collect();
        assert_eq!(hops, vec!["blog", "author", "country"]);
        assert_eq!(field.attribute.name, "code");
        assert!(!field.is_multi_valued());
    }

    #[test]
    fn test_resolve_legacy_separator() {
        let dotted = Entity::View.resolve_path("blog.author.username").unwrap();
        let legacy = Entity::View.resolve_path("blog__author__username").unwrap();
        assert_eq!(dotted.hops, legacy.hops);
        assert_eq!(dotted.attribute, legacy.attribute);
    }

    #[test]
    fn test_resolve_trailing_relation_uses_id() {
        let field = Entity::View.resolve_path("viewer").unwrap();
        assert_eq!(field.hops.len(), 1);
        assert_eq!(field.attribute.name, "id");
    }

    #[test]
    fn test_resolve_many_relation() {
        let field = Entity::View.resolve_path("blog.author.blogs.title").unwrap();
        assert!(field.is_multi_valued());
    }

    #[test]
    fn test_unknown_segment() {
        let err = Entity::View.resolve_path("blog.nope").unwrap_err();
        assert!(matches!(err, PathError::UnknownField { entity: Entity::Blog, ref segment, .. } if segment == "nope"));
    }

    #[test]
    fn test_cannot_traverse_attribute() {
        let err = Entity::View.resolve_path("ip_address.length").unwrap_err();
        assert!(matches!(err, PathError::NotARelation { .. }));
    }

    #[test]
    fn test_empty_segment() {
        assert!(matches!(
            Entity::View.resolve_path("blog..title"),
            Err(PathError::EmptySegment(_))
        ));
        assert_eq!(Entity::View.resolve_path(""), Err(PathError::Empty));
    }
}
