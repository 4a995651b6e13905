//! Flag-difference diagnostics.
//!
//! Entity strategies use these to warn when a patch silently changes a
//! modifier (visibility, finality, ...) of the item it replaces. The
//! functions here are pure; [`LogContext::check_flags`] wires them to the
//! logger.
//!
//! [`LogContext::check_flags`]: crate::context::LogContext::check_flags

/// A named bit within a modifier mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Flag {
    pub name: &'static str,
    pub mask: u32,
}

impl Flag {
    pub const fn new(name: &'static str, mask: u32) -> Self {
        Self { name, mask }
    }

    /// Returns `true` if this flag is present in `bits`.
    pub fn is_set(&self, bits: u32) -> bool {
        bits & self.mask != 0
    }
}

/// The flags from `flags` whose presence differs between the two masks,
/// in table order.
pub fn changed_flags(before: u32, after: u32, flags: &[Flag]) -> impl Iterator<Item = &Flag> + '_ {
    flags
        .iter()
        .filter(move |flag| flag.is_set(before) != flag.is_set(after))
}

/// One formatted diagnostic per changed flag.
pub fn flag_diagnostics<F>(before: u32, after: u32, flags: &[Flag], message: F) -> Vec<String>
where
    F: Fn(&Flag) -> String,
{
    changed_flags(before, after, flags).map(message).collect()
}

/// Access flags as encoded in dex files.
///
/// Some bits are shared between flags that apply to different item kinds
/// (`volatile`/`bridge`, `transient`/`varargs`); check against the table
/// for the item kind at hand.
pub mod access {
    use super::Flag;

    pub const PUBLIC: Flag = Flag::new("public", 0x1);
    pub const PRIVATE: Flag = Flag::new("private", 0x2);
    pub const PROTECTED: Flag = Flag::new("protected", 0x4);
    pub const STATIC: Flag = Flag::new("static", 0x8);
    pub const FINAL: Flag = Flag::new("final", 0x10);
    pub const SYNCHRONIZED: Flag = Flag::new("synchronized", 0x20);
    pub const VOLATILE: Flag = Flag::new("volatile", 0x40);
    pub const BRIDGE: Flag = Flag::new("bridge", 0x40);
    pub const TRANSIENT: Flag = Flag::new("transient", 0x80);
    pub const VARARGS: Flag = Flag::new("varargs", 0x80);
    pub const NATIVE: Flag = Flag::new("native", 0x100);
    pub const INTERFACE: Flag = Flag::new("interface", 0x200);
    pub const ABSTRACT: Flag = Flag::new("abstract", 0x400);
    pub const STRICT: Flag = Flag::new("strictfp", 0x800);
    pub const SYNTHETIC: Flag = Flag::new("synthetic", 0x1000);
    pub const ANNOTATION: Flag = Flag::new("annotation", 0x2000);
    pub const ENUM: Flag = Flag::new("enum", 0x4000);
    pub const CONSTRUCTOR: Flag = Flag::new("constructor", 0x10000);
    pub const DECLARED_SYNCHRONIZED: Flag = Flag::new("declared-synchronized", 0x20000);

    pub const VISIBILITY: [Flag; 3] = [PUBLIC, PRIVATE, PROTECTED];

    pub const CLASS: [Flag; 10] = [
        PUBLIC, PRIVATE, PROTECTED, STATIC, FINAL, INTERFACE, ABSTRACT, SYNTHETIC, ANNOTATION,
        ENUM,
    ];

    pub const FIELD: [Flag; 9] = [
        PUBLIC, PRIVATE, PROTECTED, STATIC, FINAL, VOLATILE, TRANSIENT, SYNTHETIC, ENUM,
    ];

    pub const METHOD: [Flag; 14] = [
        PUBLIC,
        PRIVATE,
        PROTECTED,
        STATIC,
        FINAL,
        SYNCHRONIZED,
        BRIDGE,
        VARARGS,
        NATIVE,
        ABSTRACT,
        STRICT,
        SYNTHETIC,
        CONSTRUCTOR,
        DECLARED_SYNCHRONIZED,
    ];
}
