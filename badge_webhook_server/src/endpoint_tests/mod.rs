mod helpers;
mod mocks;

mod claim_codes;
mod claim_page;
mod notifications;
mod webhook;
