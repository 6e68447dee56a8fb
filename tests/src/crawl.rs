mod fake;
mod mounted;
mod scheduling;
