//! Catalog operations: adding words and categories, listing categories.

use std::io::{self, BufRead, Write};

use crate::console::Console;
use crate::store::{Category, Store, StoreError, Word};

/// What the user picked when asked for a word's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChoice {
    /// Empty input: store the word without a category.
    Skip,
    Category(i64),
    Invalid,
}

/// Empty → skip; the id of an existing category → that category; anything else is invalid.
pub fn parse_category_choice(input: &str, categories: &[Category]) -> CategoryChoice {
    let input = input.trim();
    if input.is_empty() {
        return CategoryChoice::Skip;
    }
    match input.parse::<i64>() {
        Ok(id) if categories.iter().any(|c| c.id == id) => CategoryChoice::Category(id),
        _ => CategoryChoice::Invalid,
    }
}

pub fn list_categories(store: &Store) -> Result<Vec<Category>, CatalogError> {
    Ok(store.categories()?)
}

/// Add a category by name. Adding an existing name returns the existing category.
pub fn add_category(store: &Store, name: &str) -> Result<Category, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    let category = store.add_category(name)?;
    log::info!("category {} is {:?}", category.id, category.name);
    Ok(category)
}

/// Print `"{id}. {name}"` for each category under a heading.
pub(crate) fn print_categories<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    categories: &[Category],
) -> io::Result<()> {
    console.say("")?;
    console.say("Categories to choose from:")?;
    for c in categories {
        console.say(format!("{}. {}", c.id, c.name))?;
    }
    Ok(())
}

/// Interactive add: ask for both texts, then a category (re-prompting until the
/// answer is empty or a listed id) and store the word.
/// Returns `None` if input ends before the word is complete.
pub fn add_word_interactive<R: BufRead, W: Write>(
    store: &Store,
    console: &mut Console<R, W>,
    owner: &str,
) -> Result<Option<Word>, CatalogError> {
    let Some(spanish) = console.prompt("Enter the word in Spanish: ")? else {
        return Ok(None);
    };
    let Some(english) = console.prompt("Enter the English translation: ")? else {
        return Ok(None);
    };

    let categories = store.categories()?;
    print_categories(console, &categories)?;

    let category_id = loop {
        let Some(input) =
            console.prompt("Choose a category (enter the number) or press Enter to skip: ")?
        else {
            return Ok(None);
        };
        match parse_category_choice(&input, &categories) {
            CategoryChoice::Skip => break None,
            CategoryChoice::Category(id) => break Some(id),
            CategoryChoice::Invalid => {
                console.say("Invalid category. Please choose a valid category.")?;
            }
        }
    };

    let word = store.add_word(owner, &spanish, &english, category_id)?;
    console.say("Word added successfully!")?;
    Ok(Some(word))
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("category name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::{printed, scripted};

    fn cats() -> Vec<Category> {
        vec![
            Category { id: 1, name: "Outdoors".into() },
            Category { id: 3, name: "Clothes".into() },
        ]
    }

    #[test]
    fn parse_choices() {
        let cats = cats();
        assert_eq!(parse_category_choice("", &cats), CategoryChoice::Skip);
        assert_eq!(parse_category_choice("  ", &cats), CategoryChoice::Skip);
        assert_eq!(parse_category_choice("1", &cats), CategoryChoice::Category(1));
        assert_eq!(parse_category_choice(" 3 ", &cats), CategoryChoice::Category(3));
        assert_eq!(parse_category_choice("2", &cats), CategoryChoice::Invalid);
        assert_eq!(parse_category_choice("abc", &cats), CategoryChoice::Invalid);
        assert_eq!(parse_category_choice("-1", &cats), CategoryChoice::Invalid);
        assert_eq!(parse_category_choice("1", &[]), CategoryChoice::Invalid);
    }

    #[test]
    fn interactive_add_with_category() {
        let store = Store::open_in_memory().unwrap();
        let mut console = scripted(&["perro", "dog", "1"]);
        let word = add_word_interactive(&store, &mut console, "matt")
            .unwrap()
            .unwrap();
        assert_eq!(word.category_id, Some(1));
        assert_eq!(store.words("matt").unwrap(), vec![word]);

        let out = printed(&console);
        assert!(out.contains("1. Outdoors\n2. Drinks\n3. Clothes\n"));
        assert!(out.ends_with("Word added successfully!\n"));
    }

    #[test]
    fn interactive_add_reprompts_until_valid() {
        let store = Store::open_in_memory().unwrap();
        let mut console = scripted(&["agua", "water", "abc", "42", "2"]);
        let word = add_word_interactive(&store, &mut console, "matt")
            .unwrap()
            .unwrap();
        assert_eq!(word.category_id, Some(2));
        let out = printed(&console);
        assert_eq!(out.matches("Invalid category. Please choose a valid category.").count(), 2);
    }

    #[test]
    fn interactive_add_skip_category() {
        let store = Store::open_in_memory().unwrap();
        let mut console = scripted(&["hola", "hello", "oops", ""]);
        let word = add_word_interactive(&store, &mut console, "matt")
            .unwrap()
            .unwrap();
        assert_eq!(word.category_id, None);
    }

    #[test]
    fn interactive_add_stops_at_end_of_input() {
        let store = Store::open_in_memory().unwrap();
        let mut console = scripted(&["hola"]);
        assert!(add_word_interactive(&store, &mut console, "matt").unwrap().is_none());
        assert_eq!(store.word_count("matt").unwrap(), 0);
    }

    #[test]
    fn add_category_trims_and_rejects_empty() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(add_category(&store, "   "), Err(CatalogError::EmptyName)));
        let food = add_category(&store, " Food ").unwrap();
        assert_eq!(food.name, "Food");
        assert_eq!(list_categories(&store).unwrap().len(), 4);
    }
}
