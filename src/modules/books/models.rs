use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_kernel::validation::{RangeRule, TextRule, Validate, ValidationError, Violations};

const TITLE: TextRule = TextRule::new("title", 1, None);
const AUTHOR: TextRule = TextRule::new("author", 1, Some(100));
const DESCRIPTION: TextRule = TextRule::new("description", 1, Some(100));
const RATING: RangeRule = RangeRule::new("rating", 0, 100);

/// A book record. Also the request body for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Caller-chosen identifier, never reassigned.
    pub id: Uuid,
    /// At least one character.
    pub title: String,
    /// 1 to 100 characters.
    pub author: String,
    /// 1 to 100 characters when present.
    #[serde(default)]
    pub description: Option<String>,
    /// 0 to 100 inclusive.
    pub rating: i64,
}

impl Validate for Book {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        TITLE.check(&self.title, &mut violations);
        AUTHOR.check(&self.author, &mut violations);
        DESCRIPTION.check_optional(self.description.as_deref(), &mut violations);
        RATING.check(self.rating, &mut violations);
        violations.finish()
    }
}

/// Public view of a book that leaves out the rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookNoRating {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

impl From<Book> for BookNoRating {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
        }
    }
}

/// Query string of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooks {
    pub books_to_return: Option<i64>,
}

/// Query string of the gated lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginQuery {
    pub book_id: Uuid,
}

/// The four books a fresh store is seeded with.
pub static FIXTURES: Lazy<Vec<Book>> = Lazy::new(|| {
    [
        (0x71f4c2ea_1340_41f4_89f7_2852347bb0d1_u128, 1, 60),
        (0x21f4c2ea_1340_41f4_89f7_2852347bb0d1_u128, 2, 70),
        (0x31f4c2ea_1340_41f4_89f7_2852347bb0d1_u128, 3, 80),
        (0x41f4c2ea_1340_41f4_89f7_2852347bb0d1_u128, 4, 90),
    ]
    .into_iter()
    .map(|(id, n, rating)| Book {
        id: Uuid::from_u128(id),
        title: format!("Title {n}"),
        author: format!("Author {n}"),
        description: Some(format!("Description {n}")),
        rating,
    })
    .collect()
});
