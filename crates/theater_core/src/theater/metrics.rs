/// Admission counters kept by the theater.
///
/// Every customer who leaves does so exactly once: `ejected_total` counts
/// those who leave before being seated (sold out, declined alternate, left
/// the line, removed while waiting); `departed_total` counts seated parties
/// that leave or are cleared out with their auditorium.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdmissionMetrics {
    enqueued_total: u64,
    seated_total: u64,
    rerouted_total: u64,
    ejected_total: u64,
    departed_total: u64,
    capacity_reject_total: u64,
}

impl AdmissionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueued_total(&self) -> u64 {
        self.enqueued_total
    }

    /// Parties seated, rerouted ones included.
    pub fn seated_total(&self) -> u64 {
        self.seated_total
    }

    pub fn rerouted_total(&self) -> u64 {
        self.rerouted_total
    }

    pub fn ejected_total(&self) -> u64 {
        self.ejected_total
    }

    pub fn departed_total(&self) -> u64 {
        self.departed_total
    }

    /// Times a customer's requested auditorium could not hold their party.
    pub fn capacity_reject_total(&self) -> u64 {
        self.capacity_reject_total
    }

    pub(crate) fn record_enqueued(&mut self) {
        self.enqueued_total += 1;
    }

    pub(crate) fn record_seated(&mut self, rerouted: bool) {
        self.seated_total += 1;
        if rerouted {
            self.rerouted_total += 1;
        }
    }

    pub(crate) fn record_ejected(&mut self) {
        self.ejected_total += 1;
    }

    pub(crate) fn record_departed(&mut self) {
        self.departed_total += 1;
    }

    pub(crate) fn record_capacity_reject(&mut self) {
        self.capacity_reject_total += 1;
    }
}
