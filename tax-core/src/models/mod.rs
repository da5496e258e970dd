mod tax_bracket;
mod tax_input;
mod tax_result;

pub use tax_bracket::{BracketSchedule, ScheduleError, TaxBracket};
pub use tax_input::{
    InvestingDeclaration, InvestmentOutcome, SpendingCategory, SpendingDeclaration, TaxInput,
};
pub use tax_result::{BracketTaxLine, TaxResult};
