//! Behaviour of constants generated from the fixture schemas.

use rhizome_constgen_fixtures::DwarfType;
use rhizome_constgen_fixtures::dwarf::{self, *};
use rhizome_constgen_fixtures::scenarios::*;
// Both generated modules declare their own `LookupMiss`.
use rhizome_constgen_fixtures::scenarios::LookupMiss;
use std::panic;

// =============================================================================
// Tag scenario
// =============================================================================

#[test]
fn test_tag_static_list() {
    assert_eq!(Tag_static_list.len(), 2);
    assert_eq!(Tag_static_list[0].value, 1);
    assert_eq!(Tag_static_list[1].value, 15);
}

#[test]
fn test_tag_aliases_follow_list_order() {
    assert_eq!(Tag_Array, Tag_static_list[0]);
    assert_eq!(Tag_Pointer, Tag_static_list[1]);
    assert_eq!(Tag_Array.value, 1);
    assert_eq!(Tag_Pointer.value, 15);
}

#[test]
fn test_tag_lookup() {
    assert_eq!(get_Tag(1), Tag_Array);
    assert_eq!(get_Tag(15), Tag_Pointer);
    assert_eq!(try_get_Tag(15), Ok(Tag_Pointer));
}

#[test]
fn test_tag_lookup_miss() {
    let miss = try_get_Tag(99).unwrap_err();
    assert_eq!(miss, LookupMiss { list: "Tag_static_list" });
    assert_eq!(miss.to_string(), "value was not part of Tag_static_list");

    let err: Box<dyn std::error::Error> = Box::new(miss);
    assert!(err.to_string().contains("Tag_static_list"));
}

#[test]
#[should_panic(expected = "value was not part of Tag_static_list (99)")]
fn test_tag_get_panics_on_miss() {
    get_Tag(99);
}

#[test]
fn test_tag_converts_to_value() {
    let raw: u16 = Tag_Pointer.into();
    assert_eq!(raw, 15);
}

// =============================================================================
// Plain groups
// =============================================================================

#[test]
fn test_version_constants() {
    assert_eq!(Version_V1.major, 1);
    assert_eq!(Version_V1.minor, 0);
    assert_eq!(Version_V2.major, 2);
    assert_eq!(Version_V2.minor, 3);
}

#[test]
fn test_swapped_format_binds_by_position() {
    // Same literals as Version_V1, with the format fields declared in reverse.
    assert_eq!(Swapped_V1.minor, 1);
    assert_eq!(Swapped_V1.major, 0);
}

// =============================================================================
// Multi-field lookup group
// =============================================================================

#[test]
fn test_flag_fields() {
    assert_eq!(Flag_Off.value, 0);
    assert!(!Flag_Off.enabled);
    assert_eq!(Flag_Off.label, "off");

    assert_eq!(Flag_Auto.value, -1);
    assert!(Flag_Auto.enabled);
    assert_eq!(Flag_Auto.label, "auto");
}

#[test]
fn test_flag_lookup_round_trip() {
    for (index, flag) in Flag_static_list.iter().enumerate() {
        assert_eq!(get_Flag(flag.value), Flag_static_list[index]);
    }
    assert_eq!(get_Flag(-1), Flag_Auto);
    assert!(try_get_Flag(7).is_err());
}

// =============================================================================
// DWARF constants
// =============================================================================

#[test]
fn test_dwarf_tags() {
    assert_eq!(DW_TAG_padding.value, 0x00);
    assert_eq!(DW_TAG_array_type.value, 0x01);
    assert_eq!(DW_TAG_base_type.value, 0x24);
    assert_eq!(u8::from(DW_TAG_compile_unit), 0x11);
    assert_eq!(DW_CHILDREN_yes.value, 1);
}

#[test]
fn test_dwarf_attributes() {
    assert_eq!(DW_AT_name.value, 0x03);
    assert_eq!(DW_AT_byte_size.value, 0x0b);
}

#[test]
fn test_dwarf_form_lookup() {
    let form = get_DW_FORM(0x0e);
    assert_eq!(form, DW_FORM_strp);
    assert_eq!(form.r#type, DwarfType::StringPtr);

    assert_eq!(get_DW_FORM(0x0b).r#type.fixed_size(), Some(1));
    assert_eq!(get_DW_FORM(0x19), DW_FORM_flag_present);
    assert_eq!(DW_FORM_flag_present.r#type.fixed_size(), Some(0));
    assert_eq!(get_DW_FORM(0x10).r#type.fixed_size(), None);
}

#[test]
fn test_dwarf_form_aliases_cover_list() {
    assert_eq!(DW_FORM_static_list.len(), 25);
    assert_eq!(DW_FORM_static_list[0], DW_FORM_form_addr);
    assert_eq!(DW_FORM_static_list[24], DW_FORM_ref_sig8);

    for form in DW_FORM_static_list {
        assert_eq!(get_DW_FORM(form.value), form);
    }
}

#[test]
fn test_dwarf_form_miss() {
    assert_eq!(
        try_get_DW_FORM(0xff),
        Err(dwarf::LookupMiss {
            list: "DW_FORM_static_list"
        })
    );

    let result = panic::catch_unwind(|| get_DW_FORM(0x02));
    assert!(result.is_err());
}
