// Models module - Database entity representations

pub mod cash_card;
pub mod page;

pub use cash_card::CashCard;
pub use page::PageRequest;
