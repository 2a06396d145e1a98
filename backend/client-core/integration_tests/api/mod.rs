mod documents;
mod token;
