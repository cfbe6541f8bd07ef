use std::cmp::Reverse;

use crate::{
    error::Result,
    protocol::{
        FieldDescriptor, MessageDefinition, MessageMetadata, ResolvedField, TypeDescriptor,
        UnknownTypePolicy,
    },
    X25,
};

/// Computes CRC extras and wire layouts of message definitions
///
/// Holds no state between calls, a single instance can be shared by any number of threads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Calculator {
    policy: UnknownTypePolicy,
}

impl Calculator {
    /// Creates a [`Calculator`] rejecting unknown base types
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Calculator`] with a custom policy for unknown base types
    pub fn with_policy(policy: UnknownTypePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownTypePolicy {
        self.policy
    }

    /// Order `fields` the way they are serialized
    ///
    /// Non-extension fields come first, sorted by descending type width. Fields of the same
    /// width keep their declaration order. Extension fields follow in declaration order and
    /// their types are not looked at.
    ///
    /// # Errors
    ///
    /// Fails if the type of a non-extension field can not be resolved.
    pub fn canonical_order<'a>(
        &self,
        fields: &'a [FieldDescriptor],
    ) -> Result<Vec<&'a FieldDescriptor>> {
        let order = self.wire_order(fields)?;

        Ok(order
            .sized
            .into_iter()
            .map(|(field, _, _)| field)
            .chain(order.extensions)
            .collect())
    }

    /// Compute the CRC extra of a message
    ///
    /// The checksum covers the message name and, in serialization order, the base type,
    /// name and array length of every non-extension field. Extension fields never change it.
    pub fn crc_extra(&self, message_name: &str, fields: &[FieldDescriptor]) -> Result<u8> {
        self.checksum(message_name, &self.wire_order(fields)?)
    }

    /// Assign a byte offset to every field
    ///
    /// Fields are returned in serialization order. Extension fields are placed right after
    /// the last non-extension field.
    pub fn layout(&self, fields: &[FieldDescriptor]) -> Result<Vec<ResolvedField>> {
        self.place(self.wire_order(fields)?)
    }

    /// Checksum and layout of a whole message
    pub fn metadata(&self, definition: &MessageDefinition) -> Result<MessageMetadata> {
        let order = self.wire_order(&definition.fields)?;
        let crc_extra = self.checksum(&definition.name, &order)?;
        let fields = self.place(order)?;
        let encoded_length = fields.last().map_or(0, ResolvedField::end);

        log::debug!(
            "{} ({}): {} fields, {} bytes",
            definition.name,
            definition.id,
            fields.len(),
            encoded_length
        );

        Ok(MessageMetadata {
            id: definition.id,
            name: definition.name.clone(),
            description: definition.description.clone(),
            crc_extra,
            encoded_length,
            fields,
        })
    }

    /// Resolves every non-extension type once and sorts those fields by width
    fn wire_order<'a>(&self, fields: &'a [FieldDescriptor]) -> Result<WireOrder<'a>> {
        let (extensions, fields): (Vec<_>, Vec<_>) =
            fields.iter().partition(|field| field.is_extension);

        let mut sized = fields
            .into_iter()
            .map(|field| {
                let ty = field.resolve_type()?;
                let bits = self.policy.bit_width(&ty.base_type)?;
                Ok((field, ty, bits))
            })
            .collect::<Result<Vec<_>>>()?;

        // Must be stable, equal widths keep their declaration order
        sized.sort_by_key(|&(_, _, bits)| Reverse(bits));

        Ok(WireOrder { sized, extensions })
    }

    fn checksum(&self, message_name: &str, order: &WireOrder<'_>) -> Result<u8> {
        let mut crc = X25::new();
        accumulate_word(&mut crc, message_name)?;

        for (field, ty, _) in &order.sized {
            accumulate_word(&mut crc, &ty.base_type)?;
            accumulate_word(&mut crc, &field.name)?;
            // raw length byte, not its decimal text
            if ty.is_array() {
                crc.accumulate(&[ty.array_length]);
            }
        }

        let crc_extra = crc.crc_extra();
        log::debug!("{message_name}: crc extra {crc_extra}");
        Ok(crc_extra)
    }

    fn place(&self, order: WireOrder<'_>) -> Result<Vec<ResolvedField>> {
        let mut offset = 0;
        let mut resolved = Vec::with_capacity(order.sized.len() + order.extensions.len());

        for (field, ty, bits) in order.sized {
            let field = ResolvedField::new(field, ty, bits / 8, offset);
            offset = field.end();
            resolved.push(field);
        }

        for field in order.extensions {
            let ty = field.resolve_type()?;
            let byte_size = self.policy.byte_size(&ty.base_type)?;
            let field = ResolvedField::new(field, ty, byte_size, offset);
            offset = field.end();
            resolved.push(field);
        }

        Ok(resolved)
    }

    /// Compute the metadata of every message independently
    ///
    /// Results are paired with the message id and keep the input order. A failing message
    /// does not affect the others.
    pub fn compile_all(
        &self,
        definitions: &[MessageDefinition],
    ) -> Vec<(u32, Result<MessageMetadata>)> {
        #[cfg(feature = "rayon")]
        use rayon::prelude::*;

        #[cfg(feature = "rayon")]
        let definitions = definitions.par_iter();
        #[cfg(not(feature = "rayon"))]
        let definitions = definitions.iter();

        definitions
            .map(|definition| self.compile(definition))
            .collect()
    }

    fn compile(&self, definition: &MessageDefinition) -> (u32, Result<MessageMetadata>) {
        let metadata = self.metadata(definition);
        if let Err(e) = &metadata {
            log::debug!("{} ({}): {e}", definition.name, definition.id);
        }
        (definition.id, metadata)
    }
}

/// Fields in serialization order, split where the extensions start
struct WireOrder<'a> {
    /// Non-extension fields with their resolved type and bit width, widest first
    sized: Vec<(&'a FieldDescriptor, TypeDescriptor, u8)>,
    extensions: Vec<&'a FieldDescriptor>,
}

fn accumulate_word(crc: &mut X25, word: &str) -> Result<()> {
    crc.accumulate_str(word)?;
    crc.accumulate(b" ");
    Ok(())
}

/// [`Calculator::canonical_order`] rejecting unknown base types
pub fn canonical_order(fields: &[FieldDescriptor]) -> Result<Vec<&FieldDescriptor>> {
    Calculator::new().canonical_order(fields)
}

/// [`Calculator::crc_extra`] rejecting unknown base types
pub fn crc_extra(message_name: &str, fields: &[FieldDescriptor]) -> Result<u8> {
    Calculator::new().crc_extra(message_name, fields)
}

/// [`Calculator::layout`] rejecting unknown base types
pub fn layout(fields: &[FieldDescriptor]) -> Result<Vec<ResolvedField>> {
    Calculator::new().layout(fields)
}
