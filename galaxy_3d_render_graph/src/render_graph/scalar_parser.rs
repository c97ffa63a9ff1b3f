/// Scalar and enum parsers.
///
/// Translate JSON tokens into the typed values of `types.rs`. Tokens are
/// matched case-insensitively. An unknown token is always a format error:
/// a typo in a flag name must never silently become a no-op.

use std::ops::BitOr;
use serde_json::Value;
use crate::error::Result;
use crate::{graph_bail, graph_err};
use super::json_reader::{value_as_f32, value_as_str, value_as_u32, JsonObject};
use super::types::{
    BufferAccess, BufferUsage, ClearValue, Condition, CountSource, Extent, Format,
    FormatSource, ImageAccess, Index, Layers, LayersSource, LoadOp, PassDomain, PassFlags,
    PassType, Repeat, ResourceFlags, ResourceType, SizeSource, StoreOp, TextureUsage,
};

const SOURCE: &str = "galaxy3d::GraphLoader";

// ===== TOKEN TABLES =====

const RESOURCE_TYPE_TOKENS: &[(&str, ResourceType)] = &[
    ("image", ResourceType::Image),
    ("buffer", ResourceType::Buffer),
];

const PASS_TYPE_TOKENS: &[(&str, PassType)] = &[
    ("graphics", PassType::Graphics),
    ("compute", PassType::Compute),
    ("transfer", PassType::Transfer),
];

const PASS_DOMAIN_TOKENS: &[(&str, PassDomain)] = &[
    ("WORLD", PassDomain::World),
    ("UI", PassDomain::Ui),
    ("SHADOW", PassDomain::Shadow),
    ("POST", PassDomain::Post),
    ("SKYBOX", PassDomain::Skybox),
];

const CONDITION_TOKENS: &[(&str, Condition)] = &[
    ("none", Condition::None),
    ("editor_enabled", Condition::EditorEnabled),
    ("!editor_enabled", Condition::EditorDisabled),
];

const COUNT_SOURCE_TOKENS: &[(&str, CountSource)] = &[
    ("shadow_cascade_count", CountSource::ShadowCascadeCount),
];

const SIZE_SOURCE_TOKENS: &[(&str, SizeSource)] = &[
    ("shadow_map_size", SizeSource::ShadowMapSize),
];

const LAYERS_SOURCE_TOKENS: &[(&str, LayersSource)] = &[
    ("shadow_cascade_count", LayersSource::ShadowCascadeCount),
];

const IMAGE_ACCESS_TOKENS: &[(&str, ImageAccess)] = &[
    ("SAMPLED", ImageAccess::Sampled),
    ("STORAGE_READ", ImageAccess::StorageRead),
    ("STORAGE_WRITE", ImageAccess::StorageWrite),
    ("COLOR_ATTACHMENT", ImageAccess::ColorAttachment),
    ("DEPTH_ATTACHMENT", ImageAccess::DepthAttachment),
    ("DEPTH_READ_ONLY", ImageAccess::DepthReadOnly),
    ("TRANSFER_SRC", ImageAccess::TransferSrc),
    ("TRANSFER_DST", ImageAccess::TransferDst),
    ("PRESENT", ImageAccess::Present),
];

const BUFFER_ACCESS_TOKENS: &[(&str, BufferAccess)] = &[
    ("VERTEX", BufferAccess::Vertex),
    ("INDEX", BufferAccess::Index),
    ("UNIFORM", BufferAccess::Uniform),
    ("STORAGE_READ", BufferAccess::StorageRead),
    ("STORAGE_WRITE", BufferAccess::StorageWrite),
    ("TRANSFER_SRC", BufferAccess::TransferSrc),
    ("TRANSFER_DST", BufferAccess::TransferDst),
];

const FORMAT_TOKENS: &[(&str, FormatSource)] = &[
    ("R8G8B8A8_UNORM", FormatSource::Explicit(Format::R8G8B8A8_UNORM)),
    ("R8G8B8A8_SRGB", FormatSource::Explicit(Format::R8G8B8A8_SRGB)),
    ("R8G8B8A8_UINT", FormatSource::Explicit(Format::R8G8B8A8_UINT)),
    ("R8G8B8A8_SNORM", FormatSource::Explicit(Format::R8G8B8A8_SNORM)),
    ("R8G8B8A8_SINT", FormatSource::Explicit(Format::R8G8B8A8_SINT)),
    ("B8G8R8A8_UNORM", FormatSource::Explicit(Format::B8G8R8A8_UNORM)),
    ("B8G8R8A8_SRGB", FormatSource::Explicit(Format::B8G8R8A8_SRGB)),
    ("R8_UNORM", FormatSource::Explicit(Format::R8_UNORM)),
    ("R16_SFLOAT", FormatSource::Explicit(Format::R16_SFLOAT)),
    ("R32_SFLOAT", FormatSource::Explicit(Format::R32_SFLOAT)),
    ("R32_UINT", FormatSource::Explicit(Format::R32_UINT)),
    ("R8G8_UNORM", FormatSource::Explicit(Format::R8G8_UNORM)),
    ("D16_UNORM", FormatSource::Explicit(Format::D16_UNORM)),
    ("D32_SFLOAT", FormatSource::Explicit(Format::D32_SFLOAT)),
    ("D24_UNORM_S8_UINT", FormatSource::Explicit(Format::D24_UNORM_S8_UINT)),
    ("SWAPCHAIN", FormatSource::Swapchain),
    ("SWAPCHAIN_DEPTH", FormatSource::SwapchainDepth),
    ("SHADOW_DEPTH", FormatSource::ShadowDepth),
];

const LOAD_OP_TOKENS: &[(&str, LoadOp)] = &[
    ("LOAD", LoadOp::Load),
    ("CLEAR", LoadOp::Clear),
    ("DONT_CARE", LoadOp::DontCare),
];

const STORE_OP_TOKENS: &[(&str, StoreOp)] = &[
    ("STORE", StoreOp::Store),
    ("DONT_CARE", StoreOp::DontCare),
];

// ===== GENERIC HELPERS =====

/// Case-insensitive table lookup, surrounding whitespace ignored
fn match_token<T: Copy>(token: &str, table: &[(&str, T)]) -> Option<T> {
    let token = token.trim();
    table.iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|&(_, value)| value)
}

/// Lookup or fail with a format error naming what was expected
fn parse_token<T: Copy>(token: &str, path: &str, table: &[(&str, T)], what: &str) -> Result<T> {
    match_token(token, table)
        .ok_or_else(|| graph_err!(Format, SOURCE, path, "unknown {} '{}'", what, token))
}

/// Parse an optional array of flag names and OR the bits together.
/// Absent array reads as no flags.
fn parse_flag_array<F>(
    obj: &JsonObject,
    field: &str,
    what: &str,
    from_name: fn(&str) -> Option<F>,
    empty: F,
) -> Result<F>
where
    F: Copy + BitOr<Output = F>,
{
    let mut flags = empty;
    if let Some(array) = obj.optional_array(field)? {
        for (token, path) in array.strings()? {
            let bit = from_name(&token.trim().to_ascii_uppercase())
                .ok_or_else(|| graph_err!(Format, SOURCE, path, "unknown {} '{}'", what, token))?;
            flags = flags | bit;
        }
    }
    Ok(flags)
}

// ===== KINDS =====

pub(crate) fn parse_resource_type(token: &str, path: &str) -> Result<ResourceType> {
    parse_token(token, path, RESOURCE_TYPE_TOKENS, "resource type")
}

pub(crate) fn parse_pass_type(token: &str, path: &str) -> Result<PassType> {
    parse_token(token, path, PASS_TYPE_TOKENS, "pass type")
}

pub(crate) fn parse_pass_domain(token: &str, path: &str) -> Result<PassDomain> {
    parse_token(token, path, PASS_DOMAIN_TOKENS, "pass domain")
}

// ===== CONDITION / REPEAT =====

/// Optional `condition` field; absent = unconditional
pub(crate) fn parse_condition(obj: &JsonObject) -> Result<Condition> {
    match obj.optional_str("condition")? {
        None => Ok(Condition::None),
        Some(token) => parse_token(token, &obj.field_path("condition"),
            CONDITION_TOKENS, "condition"),
    }
}

/// Optional `repeat` object; absent = not repeated
pub(crate) fn parse_repeat(obj: &JsonObject) -> Result<Repeat> {
    match obj.optional_object("repeat")? {
        None => Ok(Repeat::default()),
        Some(repeat) => {
            let token = repeat.required_str("count_source")?;
            let source = parse_token(token, &repeat.field_path("count_source"),
                COUNT_SOURCE_TOKENS, "repeat count source")?;
            Ok(Repeat::from_source(source))
        }
    }
}

// ===== FLAGS / USAGE =====

pub(crate) fn parse_resource_flags(obj: &JsonObject) -> Result<ResourceFlags> {
    parse_flag_array(obj, "flags", "resource flag", ResourceFlags::from_name, ResourceFlags::empty())
}

pub(crate) fn parse_pass_flags(obj: &JsonObject) -> Result<PassFlags> {
    parse_flag_array(obj, "flags", "pass flag", PassFlags::from_name, PassFlags::empty())
}

pub(crate) fn parse_texture_usage(obj: &JsonObject) -> Result<TextureUsage> {
    parse_flag_array(obj, "usage", "texture usage", TextureUsage::from_name, TextureUsage::empty())
}

pub(crate) fn parse_buffer_usage(obj: &JsonObject) -> Result<BufferUsage> {
    parse_flag_array(obj, "usage", "buffer usage", BufferUsage::from_name, BufferUsage::empty())
}

// ===== ACCESS / FORMAT / OPS =====

pub(crate) fn parse_image_access(token: &str, path: &str) -> Result<ImageAccess> {
    parse_token(token, path, IMAGE_ACCESS_TOKENS, "image access")
}

pub(crate) fn parse_buffer_access(token: &str, path: &str) -> Result<BufferAccess> {
    parse_token(token, path, BUFFER_ACCESS_TOKENS, "buffer access")
}

pub(crate) fn parse_format(token: &str, path: &str) -> Result<FormatSource> {
    parse_token(token, path, FORMAT_TOKENS, "format")
}

pub(crate) fn parse_load_op(token: &str, path: &str) -> Result<LoadOp> {
    parse_token(token, path, LOAD_OP_TOKENS, "load op")
}

pub(crate) fn parse_store_op(token: &str, path: &str) -> Result<StoreOp> {
    parse_token(token, path, STORE_OP_TOKENS, "store op")
}

// ===== EXTENT / LAYERS =====

/// Optional `extent` object
pub(crate) fn parse_extent(obj: &JsonObject) -> Result<Option<Extent>> {
    let Some(extent) = obj.optional_object("extent")? else {
        return Ok(None);
    };

    let mode = extent.required_str("mode")?.trim();
    let mode_path = extent.field_path("mode");
    let has_size = extent.has("width") || extent.has("height");

    let resolved = if mode.eq_ignore_ascii_case("window") || mode.eq_ignore_ascii_case("viewport") {
        if has_size || extent.has("size_source") {
            graph_bail!(Semantic, SOURCE, extent.path(),
                "extent mode '{}' does not take width/height/size_source", mode);
        }
        if mode.eq_ignore_ascii_case("window") { Extent::Window } else { Extent::Viewport }
    } else if mode.eq_ignore_ascii_case("fixed") {
        if extent.has("size_source") {
            graph_bail!(Semantic, SOURCE, extent.field_path("size_source"),
                "size_source is only valid for 'square' extents");
        }
        let width = extent.required_u32("width")?;
        let height = extent.required_u32("height")?;
        if width == 0 || height == 0 {
            graph_bail!(Semantic, SOURCE, extent.path(),
                "fixed extent must be non-zero, got {}x{}", width, height);
        }
        Extent::Fixed { width, height }
    } else if mode.eq_ignore_ascii_case("square") {
        if has_size {
            graph_bail!(Semantic, SOURCE, extent.path(),
                "square extent takes size_source, not width/height");
        }
        let token = extent.required_str("size_source")?;
        let source = parse_token(token, &extent.field_path("size_source"),
            SIZE_SOURCE_TOKENS, "size source")?;
        Extent::Square(source)
    } else {
        graph_bail!(Format, SOURCE, mode_path, "unknown extent mode '{}'", mode);
    };

    Ok(Some(resolved))
}

/// `layers` / `layers_source` (mutually exclusive); absent = 1 layer
pub(crate) fn parse_layers(obj: &JsonObject) -> Result<Layers> {
    let layers = obj.optional_u32("layers")?;
    let source = obj.optional_str("layers_source")?;

    match (layers, source) {
        (Some(_), Some(_)) => graph_bail!(Semantic, SOURCE, obj.field_path("layers_source"),
            "'layers' and 'layers_source' are mutually exclusive"),
        (Some(0), None) => graph_bail!(Semantic, SOURCE, obj.field_path("layers"),
            "layer count must be at least 1"),
        (Some(count), None) => Ok(Layers::Fixed(count)),
        (None, Some(token)) => {
            let source = parse_token(token, &obj.field_path("layers_source"),
                LAYERS_SOURCE_TOKENS, "layers source")?;
            Ok(Layers::Source(source))
        }
        (None, None) => Ok(Layers::default()),
    }
}

// ===== INDEX =====

/// Literal index or `${i}` / `i` iteration token
pub(crate) fn parse_index_value(value: &Value, path: &str) -> Result<Index> {
    if value.is_string() {
        let token = value_as_str(value, path)?.trim();
        if token == super::declaration::ITERATION_TOKEN || token.eq_ignore_ascii_case("i") {
            Ok(Index::Iteration)
        } else {
            graph_bail!(Format, SOURCE, path, "unknown index token '{}'", token);
        }
    } else {
        Ok(Index::Literal(value_as_u32(value, path)?))
    }
}

/// Optional index field
pub(crate) fn parse_index(obj: &JsonObject, field: &str) -> Result<Option<Index>> {
    obj.find(field)
        .map(|value| parse_index_value(value, &obj.field_path(field)))
        .transpose()
}

// ===== CLEAR VALUE =====

/// Color clear `[r, g, b, a]`, depth clear `1.0` or `{"depth": 1.0, "stencil": 0}`
pub(crate) fn parse_clear_value(value: &Value, path: &str, is_depth: bool) -> Result<ClearValue> {
    if !is_depth {
        let Value::Array(items) = value else {
            graph_bail!(Format, SOURCE, path, "color clear value must be [r, g, b, a]");
        };
        if items.len() != 4 {
            graph_bail!(Format, SOURCE, path,
                "color clear value must have 4 components, found {}", items.len());
        }
        let mut color = [0.0f32; 4];
        for (i, item) in items.iter().enumerate() {
            color[i] = value_as_f32(item, &format!("{}[{}]", path, i))?;
        }
        return Ok(ClearValue::Color(color));
    }

    if value.is_number() {
        return Ok(ClearValue::DepthStencil { depth: value_as_f32(value, path)?, stencil: 0 });
    }
    let clear = JsonObject::new(value, path)?;
    Ok(ClearValue::DepthStencil {
        depth: clear.optional_f32("depth")?.unwrap_or(1.0),
        stencil: clear.optional_u32("stencil")?.unwrap_or(0),
    })
}

#[cfg(test)]
#[path = "scalar_parser_tests.rs"]
mod tests;
