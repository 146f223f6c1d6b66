pub mod hosted_checkout;
