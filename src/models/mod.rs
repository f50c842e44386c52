mod news;

pub use news::{NewNews, NewsItem, RawNews, UpsertOutcome, DEFAULT_CATEGORY};
