//! Argument windows
//!
//! A signature's argument types are laid end to end over the payload, each
//! taking its static wire width. Windows are validated once up front, so
//! accessors never index past the payload.

use heapless::Vec;

use serialcall_protocol::{FunctionType, LongWidth, Value, MAX_ARGS};

/// Errors from laying a signature over a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// More than [`MAX_ARGS`] argument types
    TooMany,
    /// Cumulative width exceeds the payload length
    Overflow,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    ty: FunctionType,
    start: u8,
    width: u8,
}

/// Typed view of one call's arguments
#[derive(Debug, Clone)]
pub struct Arguments<'a> {
    payload: &'a [u8],
    windows: Vec<Window, MAX_ARGS>,
    long: LongWidth,
}

impl<'a> Arguments<'a> {
    /// Slice `payload` into one window per entry of `types`
    pub fn parse(
        types: &[FunctionType],
        payload: &'a [u8],
        long: LongWidth,
    ) -> Result<Self, ArgumentError> {
        if types.len() > MAX_ARGS {
            return Err(ArgumentError::TooMany);
        }

        let mut windows = Vec::new();
        let mut offset = 0usize;
        for &ty in types {
            let width = ty.wire_width(long);
            let end = offset + width;
            if end > payload.len() {
                return Err(ArgumentError::Overflow);
            }
            // Cannot fail: types.len() <= MAX_ARGS
            let _ = windows.push(Window {
                ty,
                start: offset as u8,
                width: width as u8,
            });
            offset = end;
        }

        Ok(Self {
            payload,
            windows,
            long,
        })
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Declared type of argument `index`
    pub fn ty(&self, index: usize) -> Option<FunctionType> {
        self.windows.get(index).map(|w| w.ty)
    }

    /// Raw wire bytes of argument `index`
    pub fn raw(&self, index: usize) -> Option<&'a [u8]> {
        let window = self.windows.get(index)?;
        let start = window.start as usize;
        self.payload.get(start..start + window.width as usize)
    }

    /// Argument `index` decoded as its declared type
    pub fn value(&self, index: usize) -> Option<Value> {
        let ty = self.ty(index)?;
        Value::from_wire(ty, self.long, self.raw(index)?)
    }

    pub fn bool(&self, index: usize) -> Option<bool> {
        self.int(index).map(|v| v != 0)
    }

    pub fn i8(&self, index: usize) -> Option<i8> {
        self.int(index).map(|v| v as i8)
    }

    pub fn u8(&self, index: usize) -> Option<u8> {
        self.int(index).map(|v| v as u8)
    }

    pub fn i16(&self, index: usize) -> Option<i16> {
        self.int(index).map(|v| v as i16)
    }

    pub fn u16(&self, index: usize) -> Option<u16> {
        self.int(index).map(|v| v as u16)
    }

    pub fn i32(&self, index: usize) -> Option<i32> {
        self.int(index).map(|v| v as i32)
    }

    pub fn u32(&self, index: usize) -> Option<u32> {
        self.int(index).map(|v| v as u32)
    }

    /// Argument as a wide integer; `None` for void or missing arguments
    fn int(&self, index: usize) -> Option<i64> {
        match self.value(index)? {
            Value::Void => None,
            Value::Bool(b) => Some(b as i64),
            Value::I8(v) => Some(v as i64),
            Value::U8(v) => Some(v as i64),
            Value::I16(v) => Some(v as i64),
            Value::U16(v) => Some(v as i64),
            Value::I32(v) => Some(v as i64),
            Value::U32(v) => Some(v as i64),
        }
    }
}
