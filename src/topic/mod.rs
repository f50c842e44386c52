mod canonical;
mod hash;
mod score;

pub use canonical::canonicalize;
pub use hash::topic_key;
pub use score::trending_score;
