//! Embedded content served when every live source and the cache come up empty.

use rand::seq::IndexedRandom;

use crate::types::{BackgroundOrigin, BackgroundPhoto, QuoteOrigin, Quotation};

pub const STATIC_QUOTES: [(&str, &str); 7] = [
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "In the middle of difficulty lies opportunity.",
        "Albert Einstein",
    ),
    (
        "Simplicity is the ultimate sophistication.",
        "Leonardo da Vinci",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
    ("Who dares wins", "Sir David Stirling"),
    (
        "If I have seen further than others, it is by standing on the shoulders of giants.",
        "Isaac Newton",
    ),
    (
        "There is nothing noble in being superior to some other man. The true nobility is in being superior to your former self.",
        "Ernest Hemingway",
    ),
];

pub const STATIC_BACKGROUND_URLS: [&str; 5] = [
    "https://images.unsplash.com/photo-1557683316-973673baf926?w=1920&q=80",
    "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?w=1920&q=80",
    "https://images.unsplash.com/photo-1558591710-4b4a1ae0f04d?w=1920&q=80",
    "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=1920&q=80",
    "https://images.unsplash.com/photo-1507400492013-162706c8c05e?w=1920&q=80",
];

pub const STATIC_PHOTO_ID: &str = "fallback";
pub const STATIC_ATTRIBUTION_NAME: &str = "Unsplash";
pub const STATIC_ATTRIBUTION_URL: &str =
    "https://unsplash.com?utm_source=luminous&utm_medium=referral";

pub fn random_quote() -> Quotation {
    let (text, author) = *STATIC_QUOTES
        .choose(&mut rand::rng())
        .unwrap_or(&STATIC_QUOTES[0]);
    Quotation::new(text, author, QuoteOrigin::Static)
}

pub fn random_background() -> BackgroundPhoto {
    let url = *STATIC_BACKGROUND_URLS
        .choose(&mut rand::rng())
        .unwrap_or(&STATIC_BACKGROUND_URLS[0]);
    BackgroundPhoto {
        id: STATIC_PHOTO_ID.to_string(),
        url: url.to_string(),
        attribution_name: STATIC_ATTRIBUTION_NAME.to_string(),
        attribution_profile_url: STATIC_ATTRIBUTION_URL.to_string(),
        source_page_url: STATIC_ATTRIBUTION_URL.to_string(),
        origin: BackgroundOrigin::Static,
        download_location: None,
    }
}
