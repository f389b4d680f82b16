//! In-memory person store for testing
//!
//! Mirrors the four tables and the all-or-nothing creation contract.
//! `fail_at` makes the next creation fail at a chosen step.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::store::{CreateStep, DbError, PersonStore};
use crate::models::{CreatedPerson, PersonId, PersonProfile};

#[derive(Debug, Clone)]
struct PhoneRow {
    id: i64,
    person_id: i64,
    number: String,
}

#[derive(Debug, Clone)]
struct AddressRow {
    id: i64,
    city: String,
    state: String,
    street1: String,
    street2: String,
    zip_code: String,
}

#[derive(Debug, Clone)]
struct AddressJoinRow {
    id: i64,
    person_id: i64,
    address_id: i64,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    persons: Vec<(i64, String)>,
    phones: Vec<PhoneRow>,
    addresses: Vec<AddressRow>,
    address_joins: Vec<AddressJoinRow>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Number of rows in each table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub persons: usize,
    pub phones: usize,
    pub addresses: usize,
    pub address_joins: usize,
}

/// Person store held entirely in memory
#[derive(Default)]
pub struct MemoryPersonStore {
    tables: Mutex<Tables>,
    fail_at: Mutex<Option<CreateStep>>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_person` call fail at `step`.
    pub fn fail_at(&self, step: CreateStep) {
        *lock(&self.fail_at) = Some(step);
    }

    /// Add a phone for an existing person outside the creation workflow.
    pub fn add_phone(&self, person_id: PersonId, number: &str) {
        let mut tables = lock(&self.tables);
        let id = tables.next_id();
        tables.phones.push(PhoneRow {
            id,
            person_id: person_id.get(),
            number: number.to_owned(),
        });
    }

    pub fn row_counts(&self) -> RowCounts {
        let tables = lock(&self.tables);
        RowCounts {
            persons: tables.persons.len(),
            phones: tables.phones.len(),
            addresses: tables.addresses.len(),
            address_joins: tables.address_joins.len(),
        }
    }
}

fn check(failing: Option<CreateStep>, step: CreateStep) -> Result<(), DbError> {
    if failing == Some(step) {
        return Err(DbError::step(
            step,
            sqlx::Error::Protocol(format!("injected failure at {}", step)),
        ));
    }
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn get_person_info(&self, id: PersonId) -> Result<PersonProfile, DbError> {
        let tables = lock(&self.tables);
        let id = id.get();

        let (_, name) = tables
            .persons
            .iter()
            .find(|(pid, _)| *pid == id)
            .ok_or_else(|| DbError::person_not_found(id))?;
        let phone = tables
            .phones
            .iter()
            .filter(|p| p.person_id == id)
            .min_by_key(|p| p.id)
            .ok_or_else(|| DbError::person_not_found(id))?;
        let address = tables
            .address_joins
            .iter()
            .filter(|j| j.person_id == id)
            .min_by_key(|j| j.id)
            .and_then(|j| tables.addresses.iter().find(|a| a.id == j.address_id))
            .ok_or_else(|| DbError::person_not_found(id))?;

        Ok(PersonProfile {
            name: name.clone(),
            phone_number: phone.number.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            street1: address.street1.clone(),
            street2: address.street2.clone(),
            zip_code: address.zip_code.clone(),
        })
    }

    async fn create_person(&self, profile: &PersonProfile) -> Result<CreatedPerson, DbError> {
        let failing = lock(&self.fail_at).take();
        let mut tables = lock(&self.tables);

        // Work on a copy; it only replaces the real tables on commit.
        check(failing, CreateStep::Begin)?;
        let mut staged = tables.clone();

        check(failing, CreateStep::InsertPerson)?;
        let person_id = staged.next_id();
        staged.persons.push((person_id, profile.name.clone()));

        check(failing, CreateStep::InsertPhone)?;
        let phone_id = staged.next_id();
        staged.phones.push(PhoneRow {
            id: phone_id,
            person_id,
            number: profile.phone_number.clone(),
        });

        check(failing, CreateStep::InsertAddress)?;
        let address_id = staged.next_id();
        staged.addresses.push(AddressRow {
            id: address_id,
            city: profile.city.clone(),
            state: profile.state.clone(),
            street1: profile.street1.clone(),
            street2: profile.street2.clone(),
            zip_code: profile.zip_code.clone(),
        });

        check(failing, CreateStep::InsertAddressJoin)?;
        let address_join_id = staged.next_id();
        staged.address_joins.push(AddressJoinRow {
            id: address_join_id,
            person_id,
            address_id,
        });

        check(failing, CreateStep::Commit)?;
        *tables = staged;

        Ok(CreatedPerson {
            person_id: PersonId::new(person_id),
            phone_id,
            address_id,
            address_join_id,
        })
    }
}
