//! Test Data Builders
//!
//! Builder patterns for letters, credits and payments with sensible
//! defaults. Tests set only the fields they care about.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{BankId, CreditId, CurrencyCode, LetterId, LetterPaymentId, ProjectId};
use domain_credit::{Credit, CreditRecord, CreditStatus, NewCredit};
use domain_directory::{Bank, Project, Related};
use domain_guarantee::{
    GuaranteeLetter, LetterPayment, LetterRecord, LetterStatus, LetterType, NewGuaranteeLetter,
    NewLetterPayment,
};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{CurrencyFixtures, DateFixtures, DirectoryFixtures};

/// A bank with a generated company name
pub fn fake_bank() -> Bank {
    let name: String = CompanyName().fake();
    DirectoryFixtures::bank(&name)
}

/// A project with a generated company name
pub fn fake_project() -> Project {
    let name: String = CompanyName().fake();
    DirectoryFixtures::project(&name)
}

/// Builder for guarantee letters
///
/// Defaults to an active standard TRY letter of 100,000 at 2% commission
/// with 500 of costs, issued on the fixture "today" with no expiry.
#[derive(Debug, Clone)]
pub struct LetterBuilder {
    letter: GuaranteeLetter,
    bank: Option<Bank>,
    project: Option<Project>,
}

impl Default for LetterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LetterBuilder {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            letter: GuaranteeLetter {
                id: LetterId::new(),
                bank_id: DirectoryFixtures::bank_id(),
                project_id: DirectoryFixtures::project_id(),
                letter_type: LetterType::Standard,
                contract_amount: dec!(1000000),
                letter_percentage: dec!(10),
                letter_amount: dec!(100000),
                commission_rate: dec!(2),
                bsmv_and_other_costs: dec!(500),
                currency: CurrencyFixtures::try_(),
                purchase_date: DateFixtures::today(),
                letter_date: DateFixtures::today(),
                expiry_date: None,
                status: LetterStatus::Active,
                notes: None,
                created_at: now,
                updated_at: now,
            },
            bank: None,
            project: None,
        }
    }

    pub fn with_id(mut self, id: LetterId) -> Self {
        self.letter.id = id;
        self
    }

    pub fn with_type(mut self, letter_type: LetterType) -> Self {
        self.letter.letter_type = letter_type;
        self
    }

    pub fn with_status(mut self, status: LetterStatus) -> Self {
        self.letter.status = status;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.letter.letter_amount = amount;
        self
    }

    pub fn with_commission(mut self, rate: Decimal, costs: Decimal) -> Self {
        self.letter.commission_rate = rate;
        self.letter.bsmv_and_other_costs = costs;
        self
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.letter.currency = currency;
        self
    }

    pub fn with_expiry(mut self, expiry: Option<NaiveDate>) -> Self {
        self.letter.expiry_date = expiry;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.letter.created_at = created_at;
        self
    }

    pub fn with_notes(mut self) -> Self {
        let notes: String = Sentence(3..8).fake();
        self.letter.notes = Some(notes);
        self
    }

    /// Attaches a bank and points the letter at it
    pub fn with_bank(mut self, bank: Bank) -> Self {
        self.letter.bank_id = bank.id;
        self.bank = Some(bank);
        self
    }

    /// Attaches a project and points the letter at it
    pub fn with_project(mut self, project: Project) -> Self {
        self.letter.project_id = project.id;
        self.project = Some(project);
        self
    }

    /// Points the letter at stored rows without attaching them
    pub fn with_references(mut self, bank_id: BankId, project_id: ProjectId) -> Self {
        self.letter.bank_id = bank_id;
        self.letter.project_id = project_id;
        self
    }

    pub fn build(self) -> GuaranteeLetter {
        self.letter
    }

    pub fn build_record(self) -> LetterRecord {
        Related::new(self.letter, self.bank, self.project)
    }

    /// The create payload matching this letter
    pub fn build_new(self) -> NewGuaranteeLetter {
        let letter = self.letter;
        NewGuaranteeLetter {
            bank_id: letter.bank_id,
            project_id: letter.project_id,
            letter_type: letter.letter_type,
            contract_amount: letter.contract_amount,
            letter_percentage: letter.letter_percentage,
            letter_amount: letter.letter_amount,
            commission_rate: letter.commission_rate,
            bsmv_and_other_costs: letter.bsmv_and_other_costs,
            currency: letter.currency,
            purchase_date: letter.purchase_date,
            letter_date: letter.letter_date,
            expiry_date: letter.expiry_date,
            status: letter.status,
            notes: letter.notes,
        }
    }
}

/// Builder for credits
///
/// Defaults to an ongoing TRY credit of 50,000 principal and 5,000 interest,
/// opened a year before the fixture "today" and maturing 90 days after it.
#[derive(Debug, Clone)]
pub struct CreditBuilder {
    credit: Credit,
    bank: Option<Bank>,
    project: Option<Project>,
}

impl Default for CreditBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CreditBuilder {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            credit: Credit {
                id: CreditId::new(),
                bank_id: DirectoryFixtures::bank_id(),
                project_id: DirectoryFixtures::project_id(),
                principal_amount: dec!(50000),
                interest_amount: dec!(5000),
                total_repaid_amount: Decimal::ZERO,
                currency: CurrencyFixtures::try_(),
                credit_date: DateFixtures::days_before(365),
                maturity_date: DateFixtures::days_after(90),
                status: CreditStatus::Ongoing,
                notes: None,
                created_at: now,
                updated_at: now,
            },
            bank: None,
            project: None,
        }
    }

    pub fn with_amounts(mut self, principal: Decimal, interest: Decimal) -> Self {
        self.credit.principal_amount = principal;
        self.credit.interest_amount = interest;
        self
    }

    pub fn with_repaid(mut self, repaid: Decimal) -> Self {
        self.credit.total_repaid_amount = repaid;
        self
    }

    pub fn with_status(mut self, status: CreditStatus) -> Self {
        self.credit.status = status;
        self
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.credit.currency = currency;
        self
    }

    pub fn with_credit_date(mut self, date: NaiveDate) -> Self {
        self.credit.credit_date = date;
        self
    }

    pub fn with_maturity(mut self, date: NaiveDate) -> Self {
        self.credit.maturity_date = date;
        self
    }

    pub fn with_bank(mut self, bank: Bank) -> Self {
        self.credit.bank_id = bank.id;
        self.bank = Some(bank);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.credit.project_id = project.id;
        self.project = Some(project);
        self
    }

    pub fn with_references(mut self, bank_id: BankId, project_id: ProjectId) -> Self {
        self.credit.bank_id = bank_id;
        self.credit.project_id = project_id;
        self
    }

    pub fn build(self) -> Credit {
        self.credit
    }

    pub fn build_record(self) -> CreditRecord {
        Related::new(self.credit, self.bank, self.project)
    }

    pub fn build_new(self) -> NewCredit {
        let credit = self.credit;
        NewCredit {
            bank_id: credit.bank_id,
            project_id: credit.project_id,
            principal_amount: credit.principal_amount,
            interest_amount: credit.interest_amount,
            total_repaid_amount: credit.total_repaid_amount,
            currency: credit.currency,
            credit_date: credit.credit_date,
            maturity_date: credit.maturity_date,
            status: credit.status,
            notes: credit.notes,
        }
    }
}

/// Builder for commission payments
#[derive(Debug, Clone)]
pub struct PaymentBuilder {
    payment: LetterPayment,
}

impl PaymentBuilder {
    /// A payment of 1,000 with no BSMV against the given letter
    pub fn for_letter(letter_id: LetterId) -> Self {
        let now = Utc::now();
        Self {
            payment: LetterPayment {
                id: LetterPaymentId::new(),
                letter_id,
                payment_date: DateFixtures::today(),
                amount: dec!(1000),
                bsmv: Decimal::ZERO,
                receipt_no: None,
                description: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.payment.amount = amount;
        self
    }

    pub fn with_bsmv(mut self, bsmv: Decimal) -> Self {
        self.payment.bsmv = bsmv;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.payment.payment_date = date;
        self
    }

    pub fn with_receipt(mut self, receipt_no: impl Into<String>) -> Self {
        self.payment.receipt_no = Some(receipt_no.into());
        self
    }

    pub fn build(self) -> LetterPayment {
        self.payment
    }

    pub fn build_new(self) -> NewLetterPayment {
        let payment = self.payment;
        NewLetterPayment {
            letter_id: payment.letter_id,
            payment_date: payment.payment_date,
            amount: payment.amount,
            bsmv: payment.bsmv,
            receipt_no: payment.receipt_no,
            description: payment.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_builder_defaults() {
        let letter = LetterBuilder::new().build();
        assert_eq!(letter.total_commission(), dec!(2500));
        assert_eq!(letter.status, LetterStatus::Active);
        assert!(letter.expiry_date.is_none());
    }

    #[test]
    fn test_letter_builder_attaches_bank() {
        let bank = DirectoryFixtures::bank("Ziraat");
        let bank_id = bank.id;
        let record = LetterBuilder::new().with_bank(bank).build_record();
        assert_eq!(record.record.bank_id, bank_id);
        assert_eq!(record.bank_name(), Some("Ziraat"));
        assert!(record.project.is_none());
    }

    #[test]
    fn test_new_payloads_validate() {
        assert!(LetterBuilder::new().build_new().validate().is_ok());
        assert!(CreditBuilder::new().build_new().validate().is_ok());
        assert!(PaymentBuilder::for_letter(LetterId::new()).build_new().validate().is_ok());
    }

    #[test]
    fn test_fake_names_are_not_blank() {
        assert!(!fake_bank().name.trim().is_empty());
        assert!(!fake_project().name.trim().is_empty());
    }
}
