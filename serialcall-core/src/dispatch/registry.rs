//! Callables and the command registry
//!
//! The engine only borrows a callable for the duration of one dispatch.
//! Lookup returns an explicit `None` for unknown commands.

use heapless::Vec;

use serialcall_protocol::wire::CMD_HANDSHAKE_INITIATE;
use serialcall_protocol::{FunctionType, Value};

use super::args::Arguments;

/// Return type and ordered argument types of a remote function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Signature {
    pub returns: FunctionType,
    pub args: &'static [FunctionType],
}

impl Signature {
    pub const fn new(returns: FunctionType, args: &'static [FunctionType]) -> Self {
        Self { returns, args }
    }
}

/// A remotely invocable function
pub trait Callable {
    /// Describe the wire signature
    fn signature(&self) -> Signature;

    /// Run the function with arguments already sliced per [`Self::signature`]
    ///
    /// The returned value is written in the declared return type's width.
    fn invoke(&mut self, args: &Arguments<'_>) -> Value;
}

/// Maps command identifiers to callables
pub trait Registry {
    fn resolve(&mut self, command_id: u8) -> Option<&mut dyn Callable>;
}

impl<R: Registry + ?Sized> Registry for &mut R {
    fn resolve(&mut self, command_id: u8) -> Option<&mut dyn Callable> {
        (**self).resolve(command_id)
    }
}

/// Stateless callable backed by a plain function
#[derive(Clone, Copy)]
pub struct Function {
    signature: Signature,
    handler: fn(&Arguments<'_>) -> Value,
}

impl Function {
    pub const fn new(signature: Signature, handler: fn(&Arguments<'_>) -> Value) -> Self {
        Self { signature, handler }
    }
}

impl Callable for Function {
    fn signature(&self) -> Signature {
        self.signature
    }

    fn invoke(&mut self, args: &Arguments<'_>) -> Value {
        (self.handler)(args)
    }
}

/// Callable backed by a closure, for functions that own peripherals or state
pub struct Handler<F> {
    signature: Signature,
    f: F,
}

impl<F> Handler<F>
where
    F: FnMut(&Arguments<'_>) -> Value,
{
    pub fn new(signature: Signature, f: F) -> Self {
        Self { signature, f }
    }
}

impl<F> Callable for Handler<F>
where
    F: FnMut(&Arguments<'_>) -> Value,
{
    fn signature(&self) -> Signature {
        self.signature
    }

    fn invoke(&mut self, args: &Arguments<'_>) -> Value {
        (self.f)(args)
    }
}

/// Errors from building a command table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// The id is used by the protocol itself
    Reserved,
    /// The id is already registered
    Duplicate,
    /// Table is at capacity
    Full,
}

/// Fixed-capacity table of up to `N` commands
pub struct CommandTable<'a, const N: usize> {
    entries: Vec<(u8, &'a mut dyn Callable), N>,
}

impl<'a, const N: usize> Default for CommandTable<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> CommandTable<'a, N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind `callable` to `command_id`
    pub fn register(
        &mut self,
        command_id: u8,
        callable: &'a mut dyn Callable,
    ) -> Result<(), RegistryError> {
        if command_id == CMD_HANDSHAKE_INITIATE {
            return Err(RegistryError::Reserved);
        }
        if self.contains(command_id) {
            return Err(RegistryError::Duplicate);
        }
        self.entries
            .push((command_id, callable))
            .map_err(|_| RegistryError::Full)
    }

    pub fn contains(&self, command_id: u8) -> bool {
        self.entries.iter().any(|(id, _)| *id == command_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, const N: usize> Registry for CommandTable<'a, N> {
    fn resolve(&mut self, command_id: u8) -> Option<&mut dyn Callable> {
        for (id, callable) in self.entries.iter_mut() {
            if *id == command_id {
                return Some(&mut **callable);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialcall_protocol::LongWidth;

    const NEGATE: Signature = Signature::new(FunctionType::Int, &[FunctionType::Int]);

    fn negate(args: &Arguments<'_>) -> Value {
        Value::I16(args.i16(0).unwrap_or(0).wrapping_neg())
    }

    #[test]
    fn test_register_and_resolve() {
        let mut f = Function::new(NEGATE, negate);
        let mut table: CommandTable<'_, 4> = CommandTable::new();
        table.register(0x10, &mut f).unwrap();

        assert!(table.contains(0x10));
        assert_eq!(table.len(), 1);
        let callable = table.resolve(0x10).unwrap();
        assert_eq!(callable.signature(), NEGATE);

        let payload = 5i16.to_le_bytes();
        let args = Arguments::parse(NEGATE.args, &payload, LongWidth::Compat16).unwrap();
        assert_eq!(callable.invoke(&args), Value::I16(-5));
    }

    #[test]
    fn test_unknown_command_is_none() {
        let mut table: CommandTable<'_, 4> = CommandTable::new();
        assert!(table.is_empty());
        assert!(table.resolve(0x42).is_none());
    }

    #[test]
    fn test_handshake_id_reserved() {
        let mut f = Function::new(NEGATE, negate);
        let mut table: CommandTable<'_, 4> = CommandTable::new();
        assert_eq!(
            table.register(CMD_HANDSHAKE_INITIATE, &mut f),
            Err(RegistryError::Reserved)
        );
    }

    #[test]
    fn test_duplicate_and_full() {
        let mut a = Function::new(NEGATE, negate);
        let mut b = Function::new(NEGATE, negate);
        let mut c = Function::new(NEGATE, negate);
        let mut d = Function::new(NEGATE, negate);
        let mut table: CommandTable<'_, 2> = CommandTable::new();
        table.register(0x10, &mut a).unwrap();
        assert_eq!(table.register(0x10, &mut b), Err(RegistryError::Duplicate));
        table.register(0x11, &mut d).unwrap();
        assert_eq!(table.register(0x12, &mut c), Err(RegistryError::Full));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_handler_keeps_state() {
        let mut calls = 0u16;
        let mut counter = Handler::new(Signature::new(FunctionType::Word, &[]), |_| {
            calls += 1;
            Value::U16(calls)
        });
        let args = Arguments::parse(&[], &[], LongWidth::Compat16).unwrap();
        assert_eq!(counter.invoke(&args), Value::U16(1));
        assert_eq!(counter.invoke(&args), Value::U16(2));
    }
}
