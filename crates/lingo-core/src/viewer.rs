//! Listing a user's words, either all of them or one category.

use std::io::{self, BufRead, Write};

use crate::catalog::print_categories;
use crate::console::Console;
use crate::store::{Category, Store, StoreError, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSelection {
    All,
    Category(i64),
    Invalid,
}

/// `"all"` (any case) → every word; a number from 1 up to the highest category id → that
/// category; anything else is invalid. Ids in range with no category list nothing.
pub fn parse_view_selection(input: &str, categories: &[Category]) -> ViewSelection {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return ViewSelection::All;
    }
    let max_id = categories.iter().map(|c| c.id).max().unwrap_or(0);
    match input.parse::<i64>() {
        Ok(id) if (1..=max_id).contains(&id) => ViewSelection::Category(id),
        _ => ViewSelection::Invalid,
    }
}

/// Words returned by a view. "All" entries carry their category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    All(Vec<(String, Word)>),
    Category(Vec<Word>),
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::All(rows) => rows.len(),
            Listing::Category(words) => words.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run a view for `owner`. Returns `None` for an invalid selection.
pub fn view(store: &Store, owner: &str, selection: ViewSelection) -> Result<Option<Listing>, StoreError> {
    let listing = match selection {
        ViewSelection::All => Listing::All(store.words_with_category_names(owner)?),
        ViewSelection::Category(id) => Listing::Category(store.words_in_category(owner, id)?),
        ViewSelection::Invalid => return Ok(None),
    };
    Ok(Some(listing))
}

/// Print a listing followed by the `Total Words: n` footer.
pub fn render_listing<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    listing: &Listing,
) -> io::Result<()> {
    console.say("")?;
    console.say("Your Words:")?;
    match listing {
        Listing::All(rows) => {
            for (category, word) in rows {
                console.say("")?;
                console.say(format!("Category: {}", category))?;
                render_pair(console, word)?;
            }
        }
        Listing::Category(words) => {
            for word in words {
                render_pair(console, word)?;
            }
        }
    }
    console.say(format!("Total Words: {}", listing.len()))
}

fn render_pair<R: BufRead, W: Write>(console: &mut Console<R, W>, word: &Word) -> io::Result<()> {
    console.say("")?;
    console.say(format!("Spanish: {}", word.spanish))?;
    console.say(format!("   English: {}", word.english))?;
    console.say("")
}

/// Interactive view. With no preselected category, shows the category list and
/// reads a selection; an invalid one is reported once and nothing is listed.
pub fn view_interactive<R: BufRead, W: Write>(
    store: &Store,
    console: &mut Console<R, W>,
    owner: &str,
    preselected: Option<i64>,
) -> Result<Option<Listing>, ViewError> {
    let selection = match preselected {
        Some(id) => ViewSelection::Category(id),
        None => {
            let categories = store.categories()?;
            print_categories(console, &categories)?;
            console.say("")?;
            let Some(input) =
                console.prompt("Choose a category (enter the number) or 'all' to view all: ")?
            else {
                return Ok(None);
            };
            parse_view_selection(&input, &categories)
        }
    };

    let Some(listing) = view(store, owner, selection)? else {
        console.say("Invalid category selection.")?;
        return Ok(None);
    };
    render_listing(console, &listing)?;
    Ok(Some(listing))
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}
