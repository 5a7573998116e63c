//! Customer and reservation use-cases.
//!
//! # Invariants
//! - Service APIs never bypass repository normalization or persistence.
//! - Edits always start from a fresh re-fetch; no record is cached here.

use crate::model::customer::{Customer, CustomerAttrs};
use crate::model::record::{Record, RecordId};
use crate::model::reservation::{Reservation, ReservationAttrs};
use crate::repo::customer_repo::{
    CustomerRanking, CustomerRecord, CustomerRepository, DEFAULT_TOP_RANKED_LIMIT,
};
use crate::repo::reservation_repo::{ReservationRecord, ReservationRepository};
use crate::repo::RepoResult;
use serde::Serialize;

/// A customer together with all of their reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDetail {
    pub customer: CustomerRecord,
    pub reservations: Vec<ReservationRecord>,
}

/// Use-case service wrapping both repositories.
pub struct LunchlyService<C: CustomerRepository, R: ReservationRepository> {
    customers: C,
    reservations: R,
}

impl<C: CustomerRepository, R: ReservationRepository> LunchlyService<C, R> {
    pub fn new(customers: C, reservations: R) -> Self {
        Self {
            customers,
            reservations,
        }
    }

    pub fn list_customers(&self) -> RepoResult<Vec<CustomerRecord>> {
        self.customers.list_all()
    }

    /// Reservation leaderboard; `None` uses `DEFAULT_TOP_RANKED_LIMIT`.
    pub fn top_customers(&self, limit: Option<u32>) -> RepoResult<Vec<CustomerRanking>> {
        self.customers
            .list_top_ranked(limit.unwrap_or(DEFAULT_TOP_RANKED_LIMIT))
    }

    pub fn search_customers(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Vec<CustomerRecord>> {
        self.customers.search_by_name(first_name, last_name)
    }

    /// Loads a customer and their reservations. `NotFound` if the id is unknown.
    pub fn customer_detail(&self, id: RecordId) -> RepoResult<CustomerDetail> {
        let customer = self.customers.get_by_id(id)?;
        let reservations = self.customers.get_reservations(&customer)?;
        Ok(CustomerDetail {
            customer,
            reservations,
        })
    }

    /// Creates a customer and returns the saved record.
    pub fn add_customer(&self, attrs: CustomerAttrs) -> RepoResult<CustomerRecord> {
        let mut customer = Record::new(Customer::new(attrs)?);
        self.customers.save(&mut customer)?;
        Ok(customer)
    }

    /// Replaces an existing customer's fields.
    pub fn edit_customer(&self, id: RecordId, attrs: CustomerAttrs) -> RepoResult<CustomerRecord> {
        let mut customer = self.customers.get_by_id(id)?;
        customer.fields_mut().apply(attrs)?;
        self.customers.save(&mut customer)?;
        Ok(customer)
    }

    /// Books a reservation for an existing customer.
    pub fn add_reservation(
        &self,
        customer_id: RecordId,
        attrs: ReservationAttrs,
    ) -> RepoResult<ReservationRecord> {
        self.customers.get_by_id(customer_id)?;

        let mut reservation = Record::new(Reservation::new(customer_id, attrs)?);
        self.reservations.save(&mut reservation)?;
        Ok(reservation)
    }

    /// Replaces an existing reservation's editable fields.
    ///
    /// The returned record still names its customer, for redirecting back.
    pub fn edit_reservation(
        &self,
        id: RecordId,
        attrs: ReservationAttrs,
    ) -> RepoResult<ReservationRecord> {
        let mut reservation = self.reservations.get_by_id(id)?;
        reservation.fields_mut().apply(attrs)?;
        self.reservations.save(&mut reservation)?;
        Ok(reservation)
    }
}
