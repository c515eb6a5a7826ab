// glload/src/table.rs
//
//! Function pointer storage.

use crate::gl::{self, Command};

use std::fmt::{self, Debug, Formatter};
use std::os::raw::c_void;
use std::ptr;

/// One untyped address per OpenGL entry point.
///
/// Slots hold exactly what the platform loader returned, null included. Each entry point also has
/// a typed `unsafe` method on this struct (`DrawArrays`, `GetString`, ...) that calls through its
/// slot; calling one whose slot is null panics instead of jumping to address zero.
#[derive(Clone, PartialEq)]
pub struct FunctionTable {
    slots: Box<[*const c_void]>,
}

// Slots are plain addresses; which context is current where stays the caller's concern.
unsafe impl Send for FunctionTable {}
unsafe impl Sync for FunctionTable {}

impl FunctionTable {
    /// Creates a table with every slot null.
    pub fn new() -> FunctionTable {
        FunctionTable {
            slots: vec![ptr::null(); gl::COMMAND_COUNT].into_boxed_slice(),
        }
    }

    /// The address resolved for `command`, or null.
    #[inline]
    pub fn address(&self, command: Command) -> *const c_void {
        self.slots[command as usize]
    }

    #[inline]
    pub fn is_loaded(&self, command: Command) -> bool {
        !self.address(command).is_null()
    }

    /// Entry points whose slots are null, in symbol name order.
    pub fn unresolved(&self) -> impl Iterator<Item = Command> + '_ {
        Command::all().filter(move |&command| !self.is_loaded(command))
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_null()).count()
    }

    #[inline]
    pub(crate) fn set(&mut self, command: Command, address: *const c_void) {
        self.slots[command as usize] = address;
    }

    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = ptr::null());
    }

    /// Asks `loadfn` for every entry point except those in `preloaded`, overwriting each slot with
    /// the answer.
    pub(crate) fn resolve_all<F>(&mut self, loadfn: &mut F, preloaded: &[Command])
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        for &(symbol, command) in gl::COMMAND_TABLE.iter() {
            if preloaded.contains(&command) {
                continue;
            }
            self.slots[command as usize] = loadfn(symbol);
        }
    }

    /// Fills null slots from their non-null alias partners. Returns the number of slots filled.
    ///
    /// Passes repeat until nothing changes, so chains (`A ~ B ~ C` with only `C` resolved) fill
    /// completely.
    pub(crate) fn resolve_aliases(&mut self) -> usize {
        let mut filled = 0;
        loop {
            let mut filled_this_pass = 0;
            for &(a, b) in gl::ALIAS_TABLE.iter() {
                match (self.is_loaded(a), self.is_loaded(b)) {
                    (false, true) => self.set(a, self.address(b)),
                    (true, false) => self.set(b, self.address(a)),
                    _ => continue,
                }
                filled_this_pass += 1;
            }
            if filled_this_pass == 0 {
                return filled;
            }
            filled += filled_this_pass;
        }
    }

    /// The address to call for `command`. Used by the generated wrappers.
    #[inline]
    pub(crate) fn entry_point(&self, command: Command) -> *const c_void {
        let address = self.address(command);
        if address.is_null() {
            missing_entry_point(command)
        }
        address
    }
}

impl Default for FunctionTable {
    fn default() -> FunctionTable {
        FunctionTable::new()
    }
}

impl Debug for FunctionTable {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter
            .debug_struct("FunctionTable")
            .field("loaded", &self.loaded_count())
            .field("total", &gl::COMMAND_COUNT)
            .finish()
    }
}

#[cold]
#[inline(never)]
fn missing_entry_point(command: Command) -> ! {
    panic!("{} was not loaded", command.name())
}
