//! U256 model for handling large integer amounts as strings

use serde;
use std::cmp::Ordering;

/// Unsigned 256-bit value represented as a decimal string to preserve precision
///
/// Balances and invoice amounts routinely overflow native integer types, so
/// all amount arithmetic in the engine happens on the decimal digits directly:
/// scaling by powers of ten appends or truncates digits, and comparison works
/// on the zero-stripped representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct U256(pub String);

impl U256 {
	/// Create a new U256 from a string
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// A zero amount
	pub fn zero() -> Self {
		Self("0".to_string())
	}

	/// Get the raw string value
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Try to parse as u128 (for smaller values)
	pub fn as_u128(&self) -> Result<u128, std::num::ParseIntError> {
		self.0.parse()
	}

	/// Check if the value is zero
	pub fn is_zero(&self) -> bool {
		!self.0.is_empty() && self.0.chars().all(|c| c == '0')
	}

	/// Validate that the string contains only digits
	pub fn validate(&self) -> Result<(), String> {
		if self.0.is_empty() {
			return Err("U256 value cannot be empty".to_string());
		}

		if !self.0.chars().all(|c| c.is_ascii_digit()) {
			return Err("U256 value must contain only digits".to_string());
		}

		Ok(())
	}

	/// Multiply by 10^exp. Exact: appends `exp` zero digits.
	pub fn scale_up(&self, exp: u32) -> Self {
		if self.is_zero() {
			return Self::zero();
		}
		let mut value = self.significant_digits().to_string();
		value.extend(std::iter::repeat('0').take(exp as usize));
		Self(value)
	}

	/// Divide by 10^exp with truncation. The `exp` least significant digits
	/// are dropped; callers relying on this accept the precision loss.
	pub fn scale_down(&self, exp: u32) -> Self {
		let digits = self.significant_digits();
		if digits.len() <= exp as usize {
			return Self::zero();
		}
		Self(digits[..digits.len() - exp as usize].to_string())
	}

	/// The value without leading zeros ("0" for zero)
	fn significant_digits(&self) -> &str {
		let trimmed = self.0.trim_start_matches('0');
		if trimmed.is_empty() {
			"0"
		} else {
			trimmed
		}
	}
}

/// Magnitude ordering on the decimal representation: shorter zero-stripped
/// strings are smaller, equal lengths compare lexicographically.
impl Ord for U256 {
	fn cmp(&self, other: &Self) -> Ordering {
		let a = self.significant_digits();
		let b = other.significant_digits();
		a.len().cmp(&b.len()).then_with(|| a.cmp(b))
	}
}

impl PartialOrd for U256 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl std::fmt::Display for U256 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for U256 {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for U256 {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<u128> for U256 {
	fn from(value: u128) -> Self {
		Self(value.to_string())
	}
}

impl From<u64> for U256 {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

// Custom Serde implementation to serialize/deserialize as string
impl serde::Serialize for U256 {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> serde::Deserialize<'de> for U256 {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		let u256 = Self(value);
		u256.validate().map_err(serde::de::Error::custom)?;
		Ok(u256)
	}
}
