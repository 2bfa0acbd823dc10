//! Sample catalog loaded at startup

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Author, Book};

struct SeedAuthor {
    id: u128,
    first_name: &'static str,
    last_name: &'static str,
    born: (i32, u32, u32),
    died: Option<(i32, u32, u32)>,
    genre: &'static str,
    books: &'static [(u128, &'static str, &'static str)],
}

const CATALOG: &[SeedAuthor] = &[
    SeedAuthor {
        id: 0x25320c5e_f58a_4b1f_b63a_8ee07a840bdf,
        first_name: "Stephen",
        last_name: "King",
        born: (1947, 9, 21),
        died: None,
        genre: "Horror",
        books: &[
            (
                0xc7ba6add_09c4_45f8_8dd0_eaca221e5d93,
                "The Shining",
                "A family heads to an isolated hotel for the winter.",
            ),
            (
                0xa3749477_f823_4124_aa4a_fc9ad5e79cd6,
                "Misery",
                "A novelist is held captive by his number one fan.",
            ),
            (
                0x70a1f9b9_0a37_4c1a_99b1_c7709fc64167,
                "It",
                "Seven children are terrorized by a shape-shifting evil.",
            ),
        ],
    },
    SeedAuthor {
        id: 0x76053df4_6687_4353_8937_b45556748abe,
        first_name: "George",
        last_name: "RR Martin",
        born: (1948, 9, 20),
        died: None,
        genre: "Fantasy",
        books: &[(
            0x447eb762_95e9_4c31_95e1_b20053fbe215,
            "A Game of Thrones",
            "The first novel in A Song of Ice and Fire.",
        )],
    },
    SeedAuthor {
        id: 0x412c3012_d891_4f5e_9613_ff7aa63e6bb3,
        first_name: "Neil",
        last_name: "Gaiman",
        born: (1960, 11, 10),
        died: None,
        genre: "Fantasy",
        books: &[(
            0xbc4c35c3_3857_4250_9449_155fcf5109ec,
            "American Gods",
            "Old gods and new gods fight over America.",
        )],
    },
    SeedAuthor {
        id: 0x578359b7_1967_41d6_8b87_64ab7605587e,
        first_name: "Tom",
        last_name: "Lanoye",
        born: (1958, 8, 27),
        died: None,
        genre: "Various",
        books: &[(
            0x09af5a52_9421_44e8_a2bb_a6b9ccbc8239,
            "Speechless",
            "A memoir about the death of the author's mother.",
        )],
    },
    SeedAuthor {
        id: 0xf74d6899_9ed2_4137_9876_66b070553f8f,
        first_name: "Douglas",
        last_name: "Adams",
        born: (1952, 3, 11),
        died: Some((2001, 5, 11)),
        genre: "Science fiction",
        books: &[(
            0x40ff5488_fdab_45b5_bc3a_14302d59869a,
            "The Hitchhiker's Guide to the Galaxy",
            "Earth is demolished to make way for a hyperspace bypass.",
        )],
    },
    SeedAuthor {
        id: 0xa1da1d8e_1988_4634_b538_a01709477b77,
        first_name: "Jens",
        last_name: "Lapidus",
        born: (1974, 5, 24),
        died: None,
        genre: "Thriller",
        books: &[(
            0x1325360c_8253_473a_a20f_55c269c20407,
            "Easy Money",
            "Three men chase a fortune in the Stockholm underworld.",
        )],
    },
    SeedAuthor {
        id: 0x2aadd2df_7caf_45ab_9355_7f6332985a87,
        first_name: "Ursula",
        last_name: "Le Guin",
        born: (1929, 10, 21),
        died: Some((2018, 1, 22)),
        genre: "Science fiction",
        books: &[],
    },
    SeedAuthor {
        id: 0x2ee49fe3_edf2_4f91_8409_3eb25ce6ca51,
        first_name: "James",
        last_name: "Ellroy",
        born: (1948, 3, 4),
        died: None,
        genre: "Thriller",
        books: &[(
            0x2ee49fe3_edf2_4f91_8409_3eb25ce6ca52,
            "The Black Dahlia",
            "Two detectives investigate a notorious murder.",
        )],
    },
];

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The sample authors, each with its books
#[must_use]
pub fn seed_authors() -> Vec<Author> {
    CATALOG
        .iter()
        .map(|seed| {
            let id = Uuid::from_u128(seed.id);
            Author {
                id,
                first_name: seed.first_name.to_string(),
                last_name: seed.last_name.to_string(),
                date_of_birth: date(seed.born),
                date_of_death: seed.died.map(date),
                genre: seed.genre.to_string(),
                books: seed
                    .books
                    .iter()
                    .map(|&(book_id, title, description)| Book {
                        id: Uuid::from_u128(book_id),
                        title: title.to_string(),
                        description: Some(description.to_string()),
                        author_id: id,
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let authors = seed_authors();
        let mut ids = HashSet::new();
        for author in &authors {
            assert!(ids.insert(author.id));
            for book in &author.books {
                assert!(ids.insert(book.id));
                assert_eq!(book.author_id, author.id);
            }
        }
    }

    #[test]
    fn test_seed_dates_are_valid() {
        for author in seed_authors() {
            assert_ne!(author.date_of_birth, NaiveDate::default());
            if let Some(died) = author.date_of_death {
                assert!(died > author.date_of_birth);
            }
        }
    }
}
