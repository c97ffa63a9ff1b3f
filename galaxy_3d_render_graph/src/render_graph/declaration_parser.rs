/// Declaration parsers.
///
/// Compose the scalar parsers into resource, pass, attachment, resource-use
/// and output declarations. Validation order is fixed so the first reported
/// error is the most useful one: required scalars (name, type), then
/// condition and repeat, then flags, then the type-specific body.
///
/// Passes may only reference resources declared before them in the file.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::graph_bail;
use super::declaration::{
    AttachmentDecl, AttachmentSlice, Attachments, BufferDecl, ImageDecl, Outputs, PassDecl,
    ResourceDecl, ResourceKind, ResourceUse, UseAccess,
};
use super::json_reader::JsonObject;
use super::scalar_parser::{
    parse_buffer_access, parse_buffer_usage, parse_clear_value, parse_condition, parse_extent,
    parse_format, parse_image_access, parse_index, parse_layers, parse_load_op, parse_pass_domain,
    parse_pass_flags, parse_pass_type, parse_repeat, parse_resource_flags, parse_resource_type,
    parse_store_op, parse_texture_usage,
};
use super::types::{Extent, FormatSource, Index, PassType, ResourceType};

const SOURCE: &str = "galaxy3d::GraphLoader";

// ===== RESOURCE SCOPE =====

/// Resources declared so far, used to validate references
pub(crate) struct ResourceScope<'a> {
    names: &'a FxHashMap<String, usize>,
    resources: &'a [ResourceDecl],
}

impl<'a> ResourceScope<'a> {
    pub(crate) fn new(names: &'a FxHashMap<String, usize>, resources: &'a [ResourceDecl]) -> Self {
        Self { names, resources }
    }

    /// Check that `name` is a declared resource of the given kind
    pub(crate) fn expect(&self, name: &str, kind: ResourceType, path: &str) -> Result<()> {
        let Some(&index) = self.names.get(name) else {
            graph_bail!(Semantic, SOURCE, path,
                "resource '{}' is not declared (resources must be declared before use)", name);
        };
        let found = self.resources[index].resource_type();
        if found != kind {
            graph_bail!(Semantic, SOURCE, path,
                "resource '{}' is {:?}, expected {:?}", name, found, kind);
        }
        Ok(())
    }
}

/// Required, non-empty string field
fn parse_name(obj: &JsonObject, field: &str) -> Result<String> {
    let name = obj.required_str(field)?;
    if name.is_empty() {
        graph_bail!(Semantic, SOURCE, obj.field_path(field), "name must not be empty");
    }
    Ok(name.to_string())
}

// ===== RESOURCES =====

/// Parse one entry of the `resources` array
pub(crate) fn parse_resource(obj: &JsonObject) -> Result<ResourceDecl> {
    let name = parse_name(obj, "name")?;
    let resource_type = parse_resource_type(obj.required_str("type")?, &obj.field_path("type"))?;
    let condition = parse_condition(obj)?;
    let repeat = parse_repeat(obj)?;
    let flags = parse_resource_flags(obj)?;

    let kind = match resource_type {
        ResourceType::Image => ResourceKind::Image(parse_image(obj)?),
        ResourceType::Buffer => ResourceKind::Buffer(parse_buffer(obj)?),
    };

    Ok(ResourceDecl { name, condition, repeat, flags, kind })
}

fn parse_image(obj: &JsonObject) -> Result<ImageDecl> {
    let import_name = obj.optional_str("import")?.map(str::to_string);
    let is_import = import_name.is_some();

    let extent = match parse_extent(obj)? {
        Some(extent) => extent,
        None if is_import => Extent::Window,
        None => graph_bail!(Format, SOURCE, obj.field_path("extent"),
            "missing required field (non-import images need an extent)"),
    };

    let layers = parse_layers(obj)?;

    let format = match obj.optional_str("format")? {
        Some(token) => parse_format(token, &obj.field_path("format"))?,
        None if is_import => FormatSource::Swapchain,
        None => graph_bail!(Format, SOURCE, obj.field_path("format"),
            "missing required field (non-import images need a format)"),
    };

    let usage = parse_texture_usage(obj)?;
    if usage.is_empty() && !is_import {
        graph_bail!(Semantic, SOURCE, obj.field_path("usage"),
            "non-import images need at least one usage flag");
    }

    Ok(ImageDecl { import_name, extent, layers, format, usage })
}

fn parse_buffer(obj: &JsonObject) -> Result<BufferDecl> {
    let size = obj.required_u64("size")?;
    if size == 0 {
        graph_bail!(Semantic, SOURCE, obj.field_path("size"), "buffer size must be greater than 0");
    }

    let usage = parse_buffer_usage(obj)?;
    if usage.is_empty() {
        graph_bail!(Semantic, SOURCE, obj.field_path("usage"),
            "buffers need at least one usage flag");
    }

    Ok(BufferDecl { size, usage })
}

// ===== RESOURCE USES =====

/// Parse one entry of a pass `reads` / `writes` array
pub(crate) fn parse_use(obj: &JsonObject, scope: &ResourceScope) -> Result<ResourceUse> {
    let image = obj.optional_str("image")?;
    let buffer = obj.optional_str("buffer")?;

    let (name, kind) = match (image, buffer) {
        (Some(name), None) => (name, ResourceType::Image),
        (None, Some(name)) => (name, ResourceType::Buffer),
        (Some(_), Some(_)) => graph_bail!(Semantic, SOURCE, obj.path(),
            "a resource use names either 'image' or 'buffer', not both"),
        (None, None) => graph_bail!(Format, SOURCE, obj.path(),
            "a resource use needs an 'image' or 'buffer' field"),
    };
    let name_path = obj.field_path(if kind == ResourceType::Image { "image" } else { "buffer" });
    scope.expect(name, kind, &name_path)?;

    let access_token = obj.required_str("access")?;
    let access_path = obj.field_path("access");
    let access = match kind {
        ResourceType::Image => UseAccess::Image(parse_image_access(access_token, &access_path)?),
        ResourceType::Buffer => UseAccess::Buffer(parse_buffer_access(access_token, &access_path)?),
    };

    Ok(ResourceUse {
        name: name.to_string(),
        access,
        repeat: parse_repeat(obj)?,
        binding: parse_index(obj, "binding")?,
        array_index: parse_index(obj, "array_index")?,
    })
}

// ===== ATTACHMENTS =====

/// Parse a color (`is_depth == false`) or depth attachment
pub(crate) fn parse_attachment(
    obj: &JsonObject,
    scope: &ResourceScope,
    is_depth: bool,
) -> Result<AttachmentDecl> {
    let image = parse_name(obj, "image")?;
    scope.expect(&image, ResourceType::Image, &obj.field_path("image"))?;

    let load_op = parse_load_op(obj.required_str("load")?, &obj.field_path("load"))?;
    let store_op = parse_store_op(obj.required_str("store")?, &obj.field_path("store"))?;

    let clear = obj.find("clear")
        .map(|value| parse_clear_value(value, &obj.field_path("clear"), is_depth))
        .transpose()?;

    let read_only = match obj.optional_bool("read_only")? {
        Some(_) if !is_depth => graph_bail!(Semantic, SOURCE, obj.field_path("read_only"),
            "'read_only' is only valid on depth attachments"),
        Some(value) => value,
        None => false,
    };

    let slice = match obj.optional_object("slice")? {
        None => None,
        Some(slice) => {
            let layer_count = slice.optional_u32("layer_count")?.unwrap_or(1);
            if layer_count == 0 {
                graph_bail!(Semantic, SOURCE, slice.field_path("layer_count"),
                    "layer_count must be at least 1");
            }
            Some(AttachmentSlice {
                mip_level: slice.optional_u32("mip_level")?.unwrap_or(0),
                base_layer: parse_index(&slice, "base_layer")?.unwrap_or(Index::Literal(0)),
                layer_count,
            })
        }
    };

    Ok(AttachmentDecl { image, load_op, store_op, clear, read_only, slice })
}

fn parse_attachments(obj: &JsonObject, scope: &ResourceScope) -> Result<Attachments> {
    let Some(attachments) = obj.optional_object("attachments")? else {
        return Ok(Attachments::default());
    };

    let colors = attachments.array_or_empty("color")?
        .objects()
        .map(|color| parse_attachment(&color?, scope, false))
        .collect::<Result<Vec<_>>>()?;

    let depth = attachments.optional_object("depth")?
        .map(|depth| parse_attachment(&depth, scope, true))
        .transpose()?;

    Ok(Attachments { colors, depth })
}

// ===== PASSES =====

/// Parse one entry of the `passes` array
pub(crate) fn parse_pass(obj: &JsonObject, scope: &ResourceScope) -> Result<PassDecl> {
    let name = parse_name(obj, "name")?;
    let pass_type = parse_pass_type(obj.required_str("type")?, &obj.field_path("type"))?;
    let condition = parse_condition(obj)?;
    let repeat = parse_repeat(obj)?;
    let flags = parse_pass_flags(obj)?;

    let domain = if pass_type == PassType::Graphics {
        Some(parse_pass_domain(obj.required_str("domain")?, &obj.field_path("domain"))?)
    } else {
        if obj.has("domain") {
            graph_bail!(Semantic, SOURCE, obj.field_path("domain"),
                "'domain' is only valid on graphics passes");
        }
        None
    };

    let reads = obj.array_or_empty("reads")?
        .objects()
        .map(|read| parse_use(&read?, scope))
        .collect::<Result<Vec<_>>>()?;

    let writes = obj.array_or_empty("writes")?
        .objects()
        .map(|write| parse_use(&write?, scope))
        .collect::<Result<Vec<_>>>()?;

    let attachments = parse_attachments(obj, scope)?;
    if pass_type == PassType::Graphics && attachments.is_empty() {
        graph_bail!(Semantic, SOURCE, obj.field_path("attachments"),
            "graphics pass '{}' needs at least one attachment", name);
    }

    let execute = parse_name(obj, "execute")?;

    Ok(PassDecl {
        name,
        pass_type,
        flags,
        condition,
        repeat,
        domain,
        reads,
        writes,
        attachments,
        execute,
    })
}

// ===== OUTPUTS =====

/// Parse the optional `outputs` object and check every reference
pub(crate) fn parse_outputs(obj: Option<&JsonObject>, scope: &ResourceScope) -> Result<Outputs> {
    let Some(obj) = obj else {
        return Ok(Outputs::default());
    };

    let present = obj.optional_str("present")?.map(str::to_string);
    if let Some(name) = &present {
        scope.expect(name, ResourceType::Image, &obj.field_path("present"))?;
    }

    let mut export_images = Vec::new();
    for (name, path) in obj.array_or_empty("export_images")?.strings()? {
        scope.expect(name, ResourceType::Image, &path)?;
        export_images.push(name.to_string());
    }

    let mut export_buffers = Vec::new();
    for (name, path) in obj.array_or_empty("export_buffers")?.strings()? {
        scope.expect(name, ResourceType::Buffer, &path)?;
        export_buffers.push(name.to_string());
    }

    Ok(Outputs { present, export_images, export_buffers })
}

#[cfg(test)]
#[path = "declaration_parser_tests.rs"]
mod tests;
