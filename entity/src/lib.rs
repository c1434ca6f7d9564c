//! sea-orm entities for the employee management schema.

pub mod employees;
