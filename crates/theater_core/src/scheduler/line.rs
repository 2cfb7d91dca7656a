//! Named FIFO line of waiting customers.

use std::collections::VecDeque;
use std::fmt;

use crate::customer::Customer;

#[derive(Debug, Clone)]
pub struct Line {
    name: String,
    customers: VecDeque<Customer>,
}

impl Line {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            customers: VecDeque::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn front(&self) -> Option<&Customer> {
        self.customers.front()
    }

    pub fn push_back(&mut self, customer: Customer) {
        self.customers.push_back(customer);
    }

    pub fn pop_front(&mut self) -> Option<Customer> {
        self.customers.pop_front()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.customers.iter().any(|c| c.name() == name)
    }

    /// Takes `name` out of the line wherever it stands; the rest keep order.
    pub fn remove(&mut self, name: &str) -> Option<Customer> {
        let index = self.customers.iter().position(|c| c.name() == name)?;
        self.customers.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.customers.is_empty() {
            return write!(f, "No customers in the {} line!", self.name);
        }
        let noun = if self.customers.len() == 1 {
            "customer is"
        } else {
            "customers are"
        };
        write!(f, "The following {noun} in the {} line:", self.name)?;
        for customer in &self.customers {
            write!(f, "\n\t{customer}")?;
        }
        Ok(())
    }
}
