mod credentials;
mod token_grant;
