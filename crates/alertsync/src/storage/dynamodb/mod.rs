//! DynamoDB source implementation.
//!
//! Reads `iris-alerts` one scan page at a time using `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod source;

pub use source::DynamoDbSource;
