//! Synthetic ELF64 image builder shared by the integration tests.

#![allow(dead_code)]

/// One section to place in the image.
pub struct Section<'a> {
    pub name: &'a str,
    pub section_type: u32,
    pub data: &'a [u8],
}

/// A built image plus the positions the tests need to check against.
pub struct Image {
    pub bytes: Vec<u8>,
    /// `(offset, size)` of every section, in header-table order.
    pub ranges: Vec<(u64, u64)>,
    pub string_table_index: u16,
}

/// Builds an image with a NULL section at index 0 followed by `sections`.
///
/// The section-name string table is inserted at header index
/// `strtab_at` (counting the NULL section). Names are written into the
/// string table in `name_order`, a permutation of header indices
/// `1..=sections.len() + 1`.
pub fn build(sections: &[Section<'_>], strtab_at: usize, name_order: &[usize]) -> Image {
    let mut headers: Vec<(String, u32, Vec<u8>)> = vec![(String::new(), 0, Vec::new())];
    for s in sections {
        headers.push((s.name.to_owned(), s.section_type, s.data.to_vec()));
    }
    headers.insert(strtab_at, (".shstrtab".to_owned(), 3, Vec::new()));

    let mut strtab = vec![0u8];
    let mut name_offsets = vec![0u32; headers.len()];
    for &i in name_order {
        name_offsets[i] = strtab.len() as u32;
        strtab.extend_from_slice(headers[i].0.as_bytes());
        strtab.push(0);
    }
    headers[strtab_at].2 = strtab;

    let mut bytes = vec![0u8; 64];
    bytes[0..4].copy_from_slice(b"\x7fELF");
    bytes[4] = 2;
    bytes[5] = 1;
    bytes[6] = 1;
    bytes[52..54].copy_from_slice(&64u16.to_le_bytes());
    bytes[58..60].copy_from_slice(&64u16.to_le_bytes());

    let mut ranges = Vec::new();
    for (i, (_, _, data)) in headers.iter().enumerate() {
        if i == 0 {
            ranges.push((0, 0));
            continue;
        }
        while bytes.len() % 4 != 0 {
            bytes.push(0);
        }
        ranges.push((bytes.len() as u64, data.len() as u64));
        bytes.extend_from_slice(data);
    }

    while bytes.len() % 8 != 0 {
        bytes.push(0);
    }
    let shoff = bytes.len() as u64;
    for (i, (_, section_type, _)) in headers.iter().enumerate() {
        let mut entry = [0u8; 64];
        entry[0..4].copy_from_slice(&name_offsets[i].to_le_bytes());
        entry[4..8].copy_from_slice(&section_type.to_le_bytes());
        entry[24..32].copy_from_slice(&ranges[i].0.to_le_bytes());
        entry[32..40].copy_from_slice(&ranges[i].1.to_le_bytes());
        entry[48..56].copy_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&entry);
    }

    bytes[40..48].copy_from_slice(&shoff.to_le_bytes());
    bytes[60..62].copy_from_slice(&(headers.len() as u16).to_le_bytes());
    bytes[62..64].copy_from_slice(&(strtab_at as u16).to_le_bytes());

    Image {
        bytes,
        ranges,
        string_table_index: strtab_at as u16,
    }
}

/// A GNU build-id note carrying a 20-byte identifier.
pub fn build_id_note(id: &[u8; 20]) -> Vec<u8> {
    let mut note = Vec::new();
    note.extend_from_slice(&4u32.to_le_bytes()); // namesz
    note.extend_from_slice(&20u32.to_le_bytes()); // descsz
    note.extend_from_slice(&3u32.to_le_bytes()); // NT_GNU_BUILD_ID
    note.extend_from_slice(b"GNU\0");
    note.extend_from_slice(id);
    note
}

/// Lowercase hex encoding.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
