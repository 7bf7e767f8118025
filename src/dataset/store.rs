//! In-memory relational store
//!
//! Holds the four tables with primary-key and reverse foreign-key indexes.
//! Rows are addressed by [`RowRef`] (table + position) while traversing.

use std::collections::HashMap;
use serde::Deserialize;
use crate::error::ParseError;
use super::records::{Blog, BlogView, Country, User};
use super::schema::{Entity, FieldRef};
use super::value::Value;

/// Raw tables as they appear in a dataset file
#[derive(Debug, Default, Deserialize)]
pub struct DatasetTables {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub blogs: Vec<Blog>,
    #[serde(default)]
    pub views: Vec<BlogView>,
}

/// A position in one of the tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowRef {
    View(usize),
    Blog(usize),
    User(usize),
    Country(usize),
}

/// The blog platform dataset with indexes for relation traversal
#[derive(Debug, Default)]
pub struct Dataset {
    countries: Vec<Country>,
    users: Vec<User>,
    blogs: Vec<Blog>,
    views: Vec<BlogView>,

    country_by_id: HashMap<i64, usize>,
    user_by_id: HashMap<i64, usize>,
    blog_by_id: HashMap<i64, usize>,

    // Reverse foreign keys, keyed by the referenced row's id
    views_by_blog: HashMap<i64, Vec<usize>>,
    views_by_viewer: HashMap<i64, Vec<usize>>,
    views_by_country: HashMap<i64, Vec<usize>>,
    blogs_by_author: HashMap<i64, Vec<usize>>,
    blogs_by_country: HashMap<i64, Vec<usize>>,
    users_by_country: HashMap<i64, Vec<usize>>,
}

impl Dataset {
    /// Build a dataset from raw tables, checking keys and foreign keys
    pub fn from_tables(tables: DatasetTables) -> Result<Self, ParseError> {
        let DatasetTables { countries, users, blogs, views } = tables;

        let country_by_id = index_by_id("countries", countries.iter().map(|c| c.id))?;
        let user_by_id = index_by_id("users", users.iter().map(|u| u.id))?;
        let blog_by_id = index_by_id("blogs", blogs.iter().map(|b| b.id))?;
        index_by_id("views", views.iter().map(|v| v.id))?;

        let mut dataset = Dataset {
            country_by_id,
            user_by_id,
            blog_by_id,
            ..Default::default()
        };

        for (pos, user) in users.iter().enumerate() {
            if let Some(country) = user.country {
                dataset.check_country("users", user.id, country)?;
                dataset.users_by_country.entry(country).or_default().push(pos);
            }
        }

        for (pos, blog) in blogs.iter().enumerate() {
            if !dataset.user_by_id.contains_key(&blog.author) {
                return Err(missing_reference("blogs", blog.id, "author", blog.author));
            }
            dataset.blogs_by_author.entry(blog.author).or_default().push(pos);
            if let Some(country) = blog.country {
                dataset.check_country("blogs", blog.id, country)?;
                dataset.blogs_by_country.entry(country).or_default().push(pos);
            }
        }

        for (pos, view) in views.iter().enumerate() {
            if !dataset.blog_by_id.contains_key(&view.blog) {
                return Err(missing_reference("views", view.id, "blog", view.blog));
            }
            dataset.views_by_blog.entry(view.blog).or_default().push(pos);
            if let Some(viewer) = view.viewer {
                if !dataset.user_by_id.contains_key(&viewer) {
                    return Err(missing_reference("views", view.id, "viewer", viewer));
                }
                dataset.views_by_viewer.entry(viewer).or_default().push(pos);
            }
            if let Some(country) = view.country {
                dataset.check_country("views", view.id, country)?;
                dataset.views_by_country.entry(country).or_default().push(pos);
            }
        }

        dataset.countries = countries;
        dataset.users = users;
        dataset.blogs = blogs;
        dataset.views = views;
        Ok(dataset)
    }

    fn check_country(&self, table: &str, id: i64, country: i64) -> Result<(), ParseError> {
        if self.country_by_id.contains_key(&country) {
            Ok(())
        } else {
            Err(missing_reference(table, id, "country", country))
        }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn blogs(&self) -> &[Blog] {
        &self.blogs
    }

    /// All view events in storage order
    pub fn view_rows(&self) -> &[BlogView] {
        &self.views
    }

    /// Get a country by id
    pub fn country(&self, id: i64) -> Option<&Country> {
        self.country_by_id.get(&id).map(|&i| &self.countries[i])
    }

    /// Get a user by id
    pub fn user(&self, id: i64) -> Option<&User> {
        self.user_by_id.get(&id).map(|&i| &self.users[i])
    }

    /// Get a blog by id
    pub fn blog(&self, id: i64) -> Option<&Blog> {
        self.blog_by_id.get(&id).map(|&i| &self.blogs[i])
    }

    /// Follow one relation from a row.
    ///
    /// Null foreign keys yield nothing; reverse relations may yield many rows.
    pub fn follow(&self, row: RowRef, relation: &str) -> Vec<RowRef> {
        match (row, relation) {
            (RowRef::View(i), "blog") => self.blog_ref(Some(self.views[i].blog)),
            (RowRef::View(i), "viewer") => self.user_ref(self.views[i].viewer),
            (RowRef::View(i), "country") => self.country_ref(self.views[i].country),
            (RowRef::Blog(i), "author") => self.user_ref(Some(self.blogs[i].author)),
            (RowRef::Blog(i), "country") => self.country_ref(self.blogs[i].country),
            (RowRef::Blog(i), "views") => many(&self.views_by_blog, self.blogs[i].id, RowRef::View),
            (RowRef::User(i), "country") => self.country_ref(self.users[i].country),
            (RowRef::User(i), "blogs") => many(&self.blogs_by_author, self.users[i].id, RowRef::Blog),
            (RowRef::User(i), "viewed_blogs") => {
                many(&self.views_by_viewer, self.users[i].id, RowRef::View)
            }
            (RowRef::Country(i), "users") => {
                many(&self.users_by_country, self.countries[i].id, RowRef::User)
            }
            (RowRef::Country(i), "blogs") => {
                many(&self.blogs_by_country, self.countries[i].id, RowRef::Blog)
            }
            (RowRef::Country(i), "blog_views") => {
                many(&self.views_by_country, self.countries[i].id, RowRef::View)
            }
            _ => Vec::new(),
        }
    }

    /// Read one attribute of a row
    pub fn read(&self, row: RowRef, attribute: &str) -> Value {
        match row {
            RowRef::View(i) => {
                let v = &self.views[i];
                match attribute {
                    "id" => Value::Int(v.id),
                    "viewed_at" => Value::Timestamp(v.viewed_at),
                    "ip_address" => v.ip_address.clone().map(Value::Text).unwrap_or(Value::Null),
                    "blog_id" => Value::Int(v.blog),
                    "viewer_id" => v.viewer.into(),
                    "country_id" => v.country.into(),
                    _ => Value::Null,
                }
            }
            RowRef::Blog(i) => {
                let b = &self.blogs[i];
                match attribute {
                    "id" => Value::Int(b.id),
                    "title" => Value::Text(b.title.clone()),
                    "content" => Value::Text(b.content.clone()),
                    "created_at" => Value::Timestamp(b.created_at),
                    "updated_at" => Value::Timestamp(b.updated_at.unwrap_or(b.created_at)),
                    "is_published" => Value::Bool(b.is_published),
                    "author_id" => Value::Int(b.author),
                    "country_id" => b.country.into(),
                    _ => Value::Null,
                }
            }
            RowRef::User(i) => {
                let u = &self.users[i];
                match attribute {
                    "id" => Value::Int(u.id),
                    "username" => Value::Text(u.username.clone()),
                    "email" => Value::Text(u.email.clone()),
                    "first_name" => Value::Text(u.first_name.clone()),
                    "last_name" => Value::Text(u.last_name.clone()),
                    "bio" => Value::Text(u.bio.clone()),
                    "is_active" => Value::Bool(u.is_active),
                    "created_at" => Value::Timestamp(u.created_at),
                    "country_id" => u.country.into(),
                    _ => Value::Null,
                }
            }
            RowRef::Country(i) => {
                let c = &self.countries[i];
                match attribute {
                    "id" => Value::Int(c.id),
                    "name" => Value::Text(c.name.clone()),
                    "code" => Value::Text(c.code.clone()),
                    _ => Value::Null,
                }
            }
        }
    }

    /// Collect every value a resolved field takes for a row.
    ///
    /// Empty when a hop hits a null foreign key or an empty reverse relation.
    pub fn values(&self, row: RowRef, field: &FieldRef) -> Vec<Value> {
        let mut frontier = vec![row];
        for hop in &field.hops {
            frontier = frontier
                .into_iter()
                .flat_map(|r| self.follow(r, hop.name))
                .collect();
            if frontier.is_empty() {
                break;
            }
        }
        frontier
            .into_iter()
            .map(|r| self.read(r, field.attribute.name))
            .collect()
    }

    fn blog_ref(&self, id: Option<i64>) -> Vec<RowRef> {
        id.and_then(|id| self.blog_by_id.get(&id))
            .map(|&i| vec![RowRef::Blog(i)])
            .unwrap_or_default()
    }

    fn user_ref(&self, id: Option<i64>) -> Vec<RowRef> {
        id.and_then(|id| self.user_by_id.get(&id))
            .map(|&i| vec![RowRef::User(i)])
            .unwrap_or_default()
    }

    fn country_ref(&self, id: Option<i64>) -> Vec<RowRef> {
        id.and_then(|id| self.country_by_id.get(&id))
            .map(|&i| vec![RowRef::Country(i)])
            .unwrap_or_default()
    }
}

impl RowRef {
    pub fn entity(&self) -> Entity {
        match self {
            RowRef::View(_) => Entity::View,
            RowRef::Blog(_) => Entity::Blog,
            RowRef::User(_) => Entity::User,
            RowRef::Country(_) => Entity::Country,
        }
    }
}

fn many(index: &HashMap<i64, Vec<usize>>, id: i64, make: fn(usize) -> RowRef) -> Vec<RowRef> {
    index
        .get(&id)
        .map(|rows| rows.iter().copied().map(make).collect())
        .unwrap_or_default()
}

fn index_by_id(
    table: &str,
    ids: impl Iterator<Item = i64>,
) -> Result<HashMap<i64, usize>, ParseError> {
    let mut index = HashMap::new();
    for (pos, id) in ids.enumerate() {
        if index.insert(id, pos).is_some() {
            return Err(ParseError::Integrity(format!(
                "duplicate id {} in {}",
                id, table
            )));
        }
    }
    Ok(index)
}

fn missing_reference(table: &str, id: i64, column: &str, target: i64) -> ParseError {
    ParseError::Integrity(format!(
        "{} row {} references missing {} {}",
        table, id, column, target
    ))
}
