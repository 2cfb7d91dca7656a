//! Theater coordinator: lines in, auditoriums out.
//!
//! Serving flows one way: the scheduler picks a line, the head customer is
//! dequeued, their auditorium is resolved by title and seats the party, and the
//! customer's record stays in the active registry until they leave.
//!
//! The customer registry holds every customer currently in the theater,
//! waiting or seated. A name is unique across both.

use std::fmt;

use super::metrics::AdmissionMetrics;
use crate::auditorium::{Auditorium, AuditoriumError, OccupancyReport};
use crate::customer::Customer;
use crate::registry::{OrderedRegistry, RegistryError};
use crate::scheduler::{Line, LineScheduler, SchedulerError};

/// Why a customer left without being seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EjectReason {
    /// No auditorium could hold the whole party.
    SoldOut,
    /// An alternate auditorium was offered and turned down.
    DeclinedAlternate,
    /// Removed from the head of the line on request.
    LeftLine,
}

/// Result of serving one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeOutcome {
    Seated {
        customer: Customer,
        /// Movie originally requested, when the party was moved to another one.
        rerouted_from: Option<String>,
    },
    Ejected {
        customer: Customer,
        reason: EjectReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TheaterError {
    CustomerNotFound { name: String },
    DuplicateCustomer { name: String },
    VenueNotFound { title: String },
    DuplicateVenue { title: String },
    Auditorium(AuditoriumError),
    Scheduler(SchedulerError),
    Registry(RegistryError),
}

impl fmt::Display for TheaterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TheaterError::CustomerNotFound { name } => {
                write!(f, "customer {name} is not in the theater")
            }
            TheaterError::DuplicateCustomer { name } => {
                write!(f, "customer {name} is already in the theater")
            }
            TheaterError::VenueNotFound { title } => write!(f, "no auditorium is showing {title}"),
            TheaterError::DuplicateVenue { title } => {
                write!(f, "an auditorium is already showing {title}")
            }
            TheaterError::Auditorium(e) => write!(f, "{e}"),
            TheaterError::Scheduler(e) => write!(f, "{e}"),
            TheaterError::Registry(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TheaterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TheaterError::Auditorium(e) => Some(e),
            TheaterError::Scheduler(e) => Some(e),
            TheaterError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AuditoriumError> for TheaterError {
    fn from(e: AuditoriumError) -> Self {
        TheaterError::Auditorium(e)
    }
}

impl From<SchedulerError> for TheaterError {
    fn from(e: SchedulerError) -> Self {
        TheaterError::Scheduler(e)
    }
}

impl From<RegistryError> for TheaterError {
    fn from(e: RegistryError) -> Self {
        TheaterError::Registry(e)
    }
}

#[derive(Debug, Clone)]
pub struct Theater {
    auditoriums: OrderedRegistry<Auditorium>,
    customers: OrderedRegistry<Customer>,
    scheduler: LineScheduler,
    ticket_price: f64,
    metrics: AdmissionMetrics,
}

impl Theater {
    /// Empty theater selling every ticket at `ticket_price`.
    ///
    /// Lines must be added and the serving order set with
    /// [`Theater::set_next_line`] before anyone can be served.
    pub fn new(ticket_price: f64) -> Self {
        Self {
            auditoriums: OrderedRegistry::new(),
            customers: OrderedRegistry::new(),
            scheduler: LineScheduler::new(),
            ticket_price,
            metrics: AdmissionMetrics::new(),
        }
    }

    pub fn ticket_price(&self) -> f64 {
        self.ticket_price
    }

    pub fn set_ticket_price(&mut self, price: f64) {
        self.ticket_price = price;
    }

    pub fn metrics(&self) -> &AdmissionMetrics {
        &self.metrics
    }

    // --- Auditoriums ----------------------------------------------------

    pub fn add_venue(&mut self, auditorium: Auditorium) -> Result<(), TheaterError> {
        let title = auditorium.title().to_string();
        self.auditoriums.add(auditorium).map_err(|e| match e {
            RegistryError::DuplicateKey => TheaterError::DuplicateVenue { title },
            other => TheaterError::Registry(other),
        })?;
        Ok(())
    }

    /// Takes an auditorium out of the theater and forgets the customers
    /// seated in it.
    ///
    /// Waiting customers who asked for it are treated as sold out when served.
    pub fn remove_venue(&mut self, title: &str) -> Result<Auditorium, TheaterError> {
        let auditorium = self
            .auditoriums
            .remove(title)
            .map_err(|_| venue_not_found(title))?;
        let released = self.forget_seated(title)?;
        tracing::debug!("VenueRemoved title={} released={}", title, released);
        Ok(auditorium)
    }

    pub fn venue(&self, title: &str) -> Result<&Auditorium, TheaterError> {
        self.auditoriums.get(title).map_err(|_| venue_not_found(title))
    }

    /// Auditoriums in ascending title order.
    pub fn venues(&self) -> impl Iterator<Item = &Auditorium> {
        self.auditoriums.iter()
    }

    pub fn venue_count(&self) -> usize {
        self.auditoriums.len()
    }

    pub fn has_enough_seats(&self, title: &str, party_size: u32) -> Result<bool, TheaterError> {
        Ok(self.venue(title)?.remaining_seats() >= party_size)
    }

    /// First auditorium, by ascending title, with room for the whole party.
    pub fn find_first_available(&self, party_size: u32) -> Option<&str> {
        self.auditoriums
            .iter()
            .find(|a| a.remaining_seats() >= party_size)
            .map(Auditorium::title)
    }

    pub fn tickets_sold_for(&self, title: &str) -> Result<u32, TheaterError> {
        Ok(self.venue(title)?.tickets_sold())
    }

    pub fn total_tickets_sold(&self) -> u64 {
        self.auditoriums
            .iter()
            .map(|a| u64::from(a.tickets_sold()))
            .sum()
    }

    /// Tickets sold across all auditoriums times the ticket price.
    pub fn total_revenue(&self) -> f64 {
        self.total_tickets_sold() as f64 * self.ticket_price
    }

    pub fn reset_ticket_counter(&mut self, title: &str) -> Result<(), TheaterError> {
        self.auditoriums
            .get_mut(title)
            .map_err(|_| venue_not_found(title))?
            .reset_ticket_counter();
        Ok(())
    }

    /// Empties an auditorium and forgets the customers seated in it.
    ///
    /// Returns how many customer records were dropped.
    pub fn clear_venue(&mut self, title: &str) -> Result<usize, TheaterError> {
        self.auditoriums
            .get_mut(title)
            .map_err(|_| venue_not_found(title))?
            .clear_all();
        let released = self.forget_seated(title)?;
        tracing::debug!("VenueCleared title={} released={}", title, released);
        Ok(released)
    }

    pub fn occupancy_report_for(&self, title: &str) -> Result<OccupancyReport, TheaterError> {
        Ok(self.venue(title)?.occupancy_report())
    }

    pub fn all_venues_empty(&self) -> bool {
        self.auditoriums.iter().all(Auditorium::is_empty)
    }

    // --- Lines ----------------------------------------------------------

    /// Adds a line and returns its index. Line 0 is the priority line.
    pub fn add_line(&mut self, name: impl Into<String>) -> usize {
        self.scheduler.add_line(name)
    }

    pub fn line(&self, index: usize) -> Result<&Line, TheaterError> {
        Ok(self.scheduler.line(index)?)
    }

    pub fn lines(&self) -> &[Line] {
        self.scheduler.lines()
    }

    pub fn line_count(&self) -> usize {
        self.scheduler.line_count()
    }

    pub fn set_next_line(&mut self, index: usize) -> Result<(), TheaterError> {
        Ok(self.scheduler.set_next_line(index)?)
    }

    pub fn next_line(&self) -> Option<usize> {
        self.scheduler.next_line()
    }

    pub fn all_lines_empty(&self) -> bool {
        self.scheduler.all_empty()
    }

    // --- Customers ------------------------------------------------------

    pub fn contains_customer(&self, name: &str) -> bool {
        self.customers.contains(name)
    }

    pub fn customer(&self, name: &str) -> Result<&Customer, TheaterError> {
        self.customers.get(name).map_err(|_| customer_not_found(name))
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Puts a new customer in line and registers them as present.
    ///
    /// Returns the index of the line they joined. A name already present in
    /// the theater is rejected before anything changes.
    pub fn enqueue(
        &mut self,
        customer: Customer,
        priority_eligible: bool,
    ) -> Result<usize, TheaterError> {
        if self.customers.contains(customer.name()) {
            return Err(TheaterError::DuplicateCustomer {
                name: customer.name().to_string(),
            });
        }
        let index = self.scheduler.select_line(priority_eligible)?;
        self.customers.add(customer.clone())?;
        self.scheduler.enqueue_at(index, customer)?;
        self.metrics.record_enqueued();
        Ok(index)
    }

    /// Customer who would be served next, without dequeuing them.
    pub fn peek_next_customer(&mut self) -> Result<Option<&Customer>, TheaterError> {
        Ok(self.scheduler.peek_next_ready()?)
    }

    /// Serves the next customer, accepting any alternate auditorium offered.
    pub fn serve_next(&mut self) -> Result<Option<ServeOutcome>, TheaterError> {
        self.serve_next_with(|_, _| true)
    }

    /// Serves the next customer.
    ///
    /// The party goes to its requested auditorium when it fits. Otherwise the
    /// first auditorium by title with enough room is offered through
    /// `accept_alternate(customer, title)`; declining, or having nowhere to
    /// go, ejects the customer. Returns `None` when every line is empty.
    pub fn serve_next_with<F>(
        &mut self,
        accept_alternate: F,
    ) -> Result<Option<ServeOutcome>, TheaterError>
    where
        F: FnOnce(&Customer, &str) -> bool,
    {
        let Some(mut customer) = self.scheduler.take_next()? else {
            return Ok(None);
        };

        let fits = self
            .auditoriums
            .get(customer.movie())
            .is_ok_and(|a| a.remaining_seats() >= customer.party_size());
        if fits {
            self.seat(&customer)?;
            self.metrics.record_seated(false);
            return Ok(Some(ServeOutcome::Seated {
                customer,
                rerouted_from: None,
            }));
        }

        self.metrics.record_capacity_reject();
        let alternate = self
            .find_first_available(customer.party_size())
            .map(str::to_string);
        let Some(title) = alternate else {
            return self.eject(customer, EjectReason::SoldOut);
        };
        if !accept_alternate(&customer, &title) {
            return self.eject(customer, EjectReason::DeclinedAlternate);
        }

        let previous = customer.reroute(title);
        self.seat(&customer)?;
        self.metrics.record_seated(true);
        tracing::debug!(
            "CustomerRerouted name={} from={} to={}",
            customer.name(),
            previous,
            customer.movie()
        );
        Ok(Some(ServeOutcome::Seated {
            customer,
            rerouted_from: Some(previous),
        }))
    }

    /// The next customer leaves the line without buying tickets.
    pub fn eject_next(&mut self) -> Result<Option<Customer>, TheaterError> {
        let Some(customer) = self.scheduler.take_next()? else {
            return Ok(None);
        };
        self.drop_record(&customer, EjectReason::LeftLine)?;
        Ok(Some(customer))
    }

    /// Removes a customer and their whole party from the theater.
    ///
    /// A seated party is released from its auditorium using the recorded party
    /// size; a waiting customer is taken out of their line. Removal errors from
    /// the auditorium are returned after the record has already been dropped.
    pub fn remove_customer(&mut self, name: &str) -> Result<Customer, TheaterError> {
        let customer = self
            .customers
            .remove(name)
            .map_err(|_| customer_not_found(name))?;
        if let Some(waiting) = self.scheduler.remove_waiting(name) {
            self.metrics.record_ejected();
            tracing::debug!("CustomerLeftLine name={}", name);
            return Ok(waiting);
        }
        self.metrics.record_departed();

        self.auditoriums
            .get_mut(customer.movie())
            .map_err(|_| venue_not_found(customer.movie()))?
            .remove_party(name, customer.party_size())?;
        tracing::debug!("CustomerDeparted name={} title={}", name, customer.movie());
        Ok(customer)
    }

    /// Drops the records of customers seated in `title`; returns how many.
    fn forget_seated(&mut self, title: &str) -> Result<usize, TheaterError> {
        let seated: Vec<String> = self
            .customers
            .iter()
            .filter(|c| c.movie() == title && !self.scheduler.is_waiting(c.name()))
            .map(|c| c.name().to_string())
            .collect();
        for name in &seated {
            self.customers.remove(name.as_str())?;
            self.metrics.record_departed();
        }
        Ok(seated.len())
    }

    fn seat(&mut self, customer: &Customer) -> Result<(), TheaterError> {
        self.auditoriums
            .get_mut(customer.movie())
            .map_err(|_| venue_not_found(customer.movie()))?
            .add_party(customer.name(), customer.party_size())?;
        // Records are replaced, never edited, so the registry sees a reroute.
        self.customers.remove(customer.name())?;
        self.customers.add(customer.clone())?;
        tracing::debug!(
            "CustomerSeated name={} title={} party={}",
            customer.name(),
            customer.movie(),
            customer.party_size()
        );
        Ok(())
    }

    fn eject(
        &mut self,
        customer: Customer,
        reason: EjectReason,
    ) -> Result<Option<ServeOutcome>, TheaterError> {
        self.drop_record(&customer, reason)?;
        Ok(Some(ServeOutcome::Ejected { customer, reason }))
    }

    fn drop_record(&mut self, customer: &Customer, reason: EjectReason) -> Result<(), TheaterError> {
        self.customers.remove(customer.name())?;
        self.metrics.record_ejected();
        tracing::debug!(
            "CustomerEjected name={} reason={:?}",
            customer.name(),
            reason
        );
        Ok(())
    }
}

fn venue_not_found(title: &str) -> TheaterError {
    TheaterError::VenueNotFound {
        title: title.to_string(),
    }
}

fn customer_not_found(name: &str) -> TheaterError {
    TheaterError::CustomerNotFound {
        name: name.to_string(),
    }
}
