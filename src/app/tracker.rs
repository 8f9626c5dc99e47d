use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::{
    data::store::{CycleStore, StoreError},
    domain::cycle::{
        Cycle, CycleError, CycleId, Record, RecordError, RecordId, RecordInput, UserId, next_id,
    },
};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// One user's cycles, read from and written back to a store.
///
/// Every mutation validates first and only then saves the user's full cycle list.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    user: UserId,
}

impl<S: CycleStore> Tracker<S> {
    pub fn new(store: S, user: UserId) -> Self {
        Self { store, user }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn cycles(&self) -> TrackerResult<Vec<Cycle>> {
        Ok(self.store.cycles_for_user(&self.user)?)
    }

    /// Most recently started cycle.
    pub fn current_cycle(&self) -> TrackerResult<Option<Cycle>> {
        Ok(self.cycles()?.into_iter().next())
    }

    pub fn cycle(&self, id: Option<&CycleId>) -> TrackerResult<Cycle> {
        match id {
            Some(id) => self
                .store
                .cycle_by_id(&self.user, id)?
                .ok_or_else(|| CycleError::CycleNotFound(id.clone()).into()),
            None => self
                .current_cycle()?
                .ok_or_else(|| CycleError::NoActiveCycle.into()),
        }
    }

    pub fn start_new_cycle(&mut self, start: NaiveDate) -> TrackerResult<Cycle> {
        let mut cycles = self.cycles()?;
        let id = next_id(cycles.iter().map(|c| c.id.0.as_str()));
        let cycle = Cycle::new(CycleId(id), self.user.clone(), start);
        cycles.insert(0, cycle.clone());
        self.store.save_cycles_for_user(&self.user, cycles)?;
        info!(cycle = %cycle.id, start = %start, "started cycle");
        Ok(cycle)
    }

    pub fn add_record(&mut self, cycle: Option<&CycleId>, input: RecordInput) -> TrackerResult<Record> {
        let mut target = self.cycle(cycle)?;
        let id = RecordId(next_id(target.records.iter().map(|r| r.id.0.as_str())));
        let record = target.add_record(id, input)?.clone();
        self.replace(target)?;
        info!(record = %record.id, day = record.cycle_day, "added record");
        Ok(record)
    }

    /// Edits a record; without a cycle id every cycle of the user is searched.
    pub fn edit_record(
        &mut self,
        cycle: Option<&CycleId>,
        id: &RecordId,
        input: RecordInput,
    ) -> TrackerResult<Record> {
        let mut target = self.cycle_holding(cycle, id)?;
        let record = target.edit_record(id, input)?.clone();
        self.replace(target)?;
        info!(record = %record.id, day = record.cycle_day, "edited record");
        Ok(record)
    }

    pub fn delete_record(&mut self, cycle: Option<&CycleId>, id: &RecordId) -> TrackerResult<Record> {
        let mut target = self.cycle_holding(cycle, id)?;
        let record = target.delete_record(id)?;
        self.replace(target)?;
        info!(record = %record.id, "deleted record");
        Ok(record)
    }

    pub fn correct_start(&mut self, cycle: &CycleId, start: NaiveDate) -> TrackerResult<Cycle> {
        let mut target = self.cycle(Some(cycle))?;
        target.correct_start_date(start)?;
        self.replace(target.clone())?;
        info!(cycle = %target.id, start = %start, "corrected cycle start");
        Ok(target)
    }

    fn cycle_holding(&self, cycle: Option<&CycleId>, record: &RecordId) -> TrackerResult<Cycle> {
        if cycle.is_some() {
            return self.cycle(cycle);
        }
        self.cycles()?
            .into_iter()
            .find(|c| c.record(record).is_some())
            .ok_or_else(|| RecordError::RecordNotFound(record.clone()).into())
    }

    fn replace(&mut self, cycle: Cycle) -> TrackerResult<()> {
        let cycles = self
            .cycles()?
            .into_iter()
            .map(|c| if c.id == cycle.id { cycle.clone() } else { c })
            .collect();
        self.store.save_cycles_for_user(&self.user, cycles)?;
        Ok(())
    }
}
