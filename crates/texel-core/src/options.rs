/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Processing options
//!
//! Every image operation receives a [`ProcessOptions`], it is the only
//! channel through which an operation gets memory for its result and its
//! scratch buffers. There is no global or thread local allocator state.
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};
use core::mem::size_of;

/// Errors returned when an operation cannot get the memory it asked for
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum AllocationErrors {
    /// The request is larger than the configured limit
    LimitExceeded { requested: usize, limit: usize },
    /// Calculating the request size overflowed
    Overflow,
    /// The allocator refused the reservation
    ReserveFailed(usize)
}

impl Debug for AllocationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LimitExceeded { requested, limit } => {
                writeln!(
                    f,
                    "Allocation of {requested} bytes exceeds the configured limit of {limit} bytes"
                )
            }
            Self::Overflow => writeln!(f, "Allocation size calculation overflowed"),
            Self::ReserveFailed(size) => writeln!(f, "Could not reserve {size} bytes")
        }
    }
}

impl Display for AllocationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocationErrors {}

/// Options respected by all image operations
///
/// To remove the annoyance of getters and setters for simple
/// use, the builder style setters return a new copy.
#[derive(Debug, Copy, Clone)]
pub struct ProcessOptions {
    /// Largest single buffer an operation may allocate, in bytes
    ///
    /// - Default value: 1 GiB
    max_memory:  usize,
    /// Largest width an operation may produce
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Largest height an operation may produce
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Treat warnings as errors
    ///
    /// Some requests are not possible (e.g reformatting a compressed image),
    /// by default these are logged and the image is left untouched.
    ///
    /// When set to true, the operation returns an error instead.
    ///
    /// - Default value: false
    strict_mode: bool
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            max_memory:  1 << 30,
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false
        }
    }
}

impl ProcessOptions {
    /// Create options with default limits, same as `default`
    pub fn new() -> ProcessOptions {
        ProcessOptions::default()
    }

    /// Get the largest single allocation allowed, in bytes
    pub const fn max_memory(&self) -> usize {
        self.max_memory
    }

    /// Get maximum width an operation may produce
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height an operation may produce
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Return true if warnings should be reported as errors
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set the largest single allocation allowed, in bytes
    #[must_use]
    pub fn set_max_memory(mut self, bytes: usize) -> Self {
        self.max_memory = bytes;
        self
    }

    /// Set the maximum width an operation may produce
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum height an operation may produce
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether warnings should be reported as errors
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Return true if `width` x `height` is within the configured limits
    pub const fn dimensions_allowed(&self, width: usize, height: usize) -> bool {
        width <= self.max_width && height <= self.max_height
    }

    /// Allocate a buffer of `count` elements, every element set to `value`
    ///
    /// # Errors
    /// - [`AllocationErrors::Overflow`] if the size in bytes overflows a `usize`
    /// - [`AllocationErrors::LimitExceeded`] if the size is above [`max_memory`](Self::max_memory)
    /// - [`AllocationErrors::ReserveFailed`] if the system allocator refuses
    pub fn allocate<T: Copy>(&self, count: usize, value: T) -> Result<Vec<T>, AllocationErrors> {
        let bytes = count
            .checked_mul(size_of::<T>())
            .ok_or(AllocationErrors::Overflow)?;

        if bytes > self.max_memory {
            return Err(AllocationErrors::LimitExceeded {
                requested: bytes,
                limit:     self.max_memory
            });
        }
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(count)
            .map_err(|_| AllocationErrors::ReserveFailed(bytes))?;
        buffer.resize(count, value);

        Ok(buffer)
    }

    /// Allocate a zeroed byte buffer of `len` bytes
    ///
    /// # Errors
    /// See [`allocate`](Self::allocate)
    pub fn allocate_bytes(&self, len: usize) -> Result<Vec<u8>, AllocationErrors> {
        self.allocate(len, 0_u8)
    }

    /// Copy `data` into a freshly allocated buffer
    ///
    /// # Errors
    /// See [`allocate`](Self::allocate)
    pub fn allocate_copy<T: Copy + Default>(&self, data: &[T]) -> Result<Vec<T>, AllocationErrors> {
        let mut buffer = self.allocate(data.len(), T::default())?;
        buffer.copy_from_slice(data);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use crate::options::{AllocationErrors, ProcessOptions};

    #[test]
    fn test_allocate_within_limit() {
        let options = ProcessOptions::new().set_max_memory(16);
        let buf = options.allocate(4, 7_u32).unwrap();
        assert_eq!(buf, [7, 7, 7, 7]);
    }

    #[test]
    fn test_allocate_over_limit() {
        let options = ProcessOptions::new().set_max_memory(15);
        assert_eq!(
            options.allocate(4, 0_u32),
            Err(AllocationErrors::LimitExceeded {
                requested: 16,
                limit:     15
            })
        );
    }

    #[test]
    fn test_allocate_overflow() {
        let options = ProcessOptions::new();
        assert_eq!(
            options.allocate(usize::MAX, 0_u32),
            Err(AllocationErrors::Overflow)
        );
    }
}
