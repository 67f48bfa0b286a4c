// Search: local stages that run before any LLM call.
// normalize turns raw scraper dataset items into Profiles; boolean_query narrows them
// down with the user's quoted-phrase / NOT / OR query.

pub mod boolean_query;
pub mod handlers;
pub mod normalize;
