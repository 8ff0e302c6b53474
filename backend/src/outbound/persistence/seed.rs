//! Seed data for the in-memory store.
//!
//! The data-layer initialiser of the sample: a couple of blogs and a handful
//! of posts so the list, filter, and edit flows have something to show. The
//! selection sizes mirror the original sample's small/medium test data sets.

use crate::domain::ports::PostRepositoryError;
use crate::domain::{Blog, BlogId};

/// How much seed data [`super::InMemoryStore::reset`] installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSelection {
    /// Two blogs, two posts.
    Small,
    /// Two blogs, five posts.
    #[default]
    Medium,
}

pub(super) struct SeedRows {
    pub(super) blogs: Vec<Blog>,
    pub(super) posts: Vec<(BlogId, &'static str, &'static str)>,
}

fn blog(raw: i32, name: &str) -> Result<Blog, PostRepositoryError> {
    Ok(Blog {
        id: blog_id(raw)?,
        name: name.to_owned(),
    })
}

fn blog_id(raw: i32) -> Result<BlogId, PostRepositoryError> {
    BlogId::new(raw).map_err(|err| PostRepositoryError::query(format!("seed blog id: {err}")))
}

pub(super) fn seed_rows(selection: SeedSelection) -> Result<SeedRows, PostRepositoryError> {
    let travel = blog_id(1)?;
    let kitchen = blog_id(2)?;
    let blogs = vec![blog(1, "Travel Notes")?, blog(2, "Kitchen Diaries")?];

    let mut posts = vec![
        (
            travel,
            "Crossing the Pennines",
            "Three days of drystone walls, sideways rain, and one unforgettable pub.",
        ),
        (
            kitchen,
            "Sourdough, attempt four",
            "The starter finally forgave me. Notes on hydration and patience.",
        ),
    ];
    if selection == SeedSelection::Medium {
        posts.extend([
            (
                travel,
                "Night train to the coast",
                "Why the slow way round is still the best way to arrive.",
            ),
            (
                travel,
                "Packing list, revised",
                "Everything I carried and the half I should have left at home.",
            ),
            (
                kitchen,
                "A soup for February",
                "Leeks, white beans, and the last of the winter greens.",
            ),
        ]);
    }

    Ok(SeedRows { blogs, posts })
}
