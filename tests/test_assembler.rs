use chip8_studio::assembler::parser::ParseError;
use chip8_studio::assembler::Assembler;
use chip8_studio::cartridge::Cartridge;

fn assemble(source: &str) -> Vec<u8> {
    Assembler::from_string(source).assemble_data().unwrap()
}

fn assemble_one(line: &str) -> u16 {
    let data = assemble(&format!("{}\n", line));
    assert_eq!(data.len(), 2);
    u16::from_be_bytes([data[0], data[1]])
}

fn parse_error(source: &str) -> ParseError {
    let error = Assembler::from_string(source).assemble_data().unwrap_err();
    *error.downcast::<ParseError>().unwrap()
}

#[test]
fn test_mnemonic_encoding() {
    assert_eq!(assemble_one("WAIT"), 0x0FFF);
    assert_eq!(assemble_one("CLS"), 0x00E0);
    assert_eq!(assemble_one("RET"), 0x00EE);
    assert_eq!(assemble_one("JP 518"), 0x1206);
    assert_eq!(assemble_one("CALL 518"), 0x2206);
    assert_eq!(assemble_one("SE v1, 0x56"), 0x3156);
    assert_eq!(assemble_one("SNE v1, 0x56"), 0x4156);
    assert_eq!(assemble_one("SE_REG v1, v2"), 0x5120);
    assert_eq!(assemble_one("LD v1, 0x56"), 0x6156);
    assert_eq!(assemble_one("ADD v1, 0x56"), 0x7156);
    assert_eq!(assemble_one("LD_REG v1, v2"), 0x8120);
    assert_eq!(assemble_one("OR v1, v2"), 0x8121);
    assert_eq!(assemble_one("AND v1, v2"), 0x8122);
    assert_eq!(assemble_one("XOR v1, v2"), 0x8123);
    assert_eq!(assemble_one("ADD_REG v1, v2"), 0x8124);
    assert_eq!(assemble_one("SUB v1, v2"), 0x8125);
    assert_eq!(assemble_one("SHR v1"), 0x8106);
    assert_eq!(assemble_one("SUBN v1, v2"), 0x8127);
    assert_eq!(assemble_one("SHL v1"), 0x810E);
    assert_eq!(assemble_one("SNE_REG v1, v2"), 0x9120);
    assert_eq!(assemble_one("LD_I 0x20E"), 0xA20E);
    assert_eq!(assemble_one("JP_V0 0x20E"), 0xB20E);
    assert_eq!(assemble_one("RND v1, 0x56"), 0xC156);
    assert_eq!(assemble_one("DRW v1, v2, 0x8"), 0xD128);
    assert_eq!(assemble_one("SKP v1"), 0xE19E);
    assert_eq!(assemble_one("SKNP v1"), 0xE1A1);
    assert_eq!(assemble_one("LD_VX_DT v1"), 0xF107);
    assert_eq!(assemble_one("LD_VX_K v1"), 0xF10A);
    assert_eq!(assemble_one("LD_DT_VX v1"), 0xF115);
    assert_eq!(assemble_one("LD_ST_VX v1"), 0xF118);
    assert_eq!(assemble_one("ADD_I_VX v1"), 0xF11E);
    assert_eq!(assemble_one("LD_F v1"), 0xF129);
    assert_eq!(assemble_one("LD_B v1"), 0xF133);
    assert_eq!(assemble_one("LD_I_TO_V v1"), 0xF155);
    assert_eq!(assemble_one("LD_V_TO_I v1"), 0xF165);
}

#[test]
fn test_operand_ranges() {
    assert_eq!(assemble_one("LD v15, 255"), 0x6FFF);
    assert_eq!(assemble_one("LD v0, 0"), 0x6000);
    assert_eq!(assemble_one("DRW v15, v15, 15"), 0xDFFF);
    assert_eq!(assemble_one("LD_I 4095"), 0xAFFF);
}

#[test]
fn test_literal_bases_agree() {
    assert_eq!(assemble_one("LD v3, 171"), assemble_one("LD v3, 0xAB"));
    assert_eq!(assemble_one("LD v3, 171"), assemble_one("LD v3, 0b10101011"));
}

#[test]
fn test_label_binds_to_next_instruction() {
    // A label on the first line points at the program start.
    assert_eq!(assemble("LOOP:\nJP LOOP\n"), vec![0x12, 0x00]);

    // A label defined after three instruction lines binds to 0x206.
    let data = assemble("CLS\nCLS\nCLS\nEND:\nJP END\n");
    assert_eq!(&data[6..8], &[0x12, 0x06]);

    // Forward references work the same way.
    let data = assemble("JP SKIP\nCLS\nSKIP:\nRET\n");
    assert_eq!(&data[0..2], &[0x12, 0x04]);
}

#[test]
fn test_comments_and_blank_lines_do_not_shift_addresses() {
    let plain = assemble("CLS\nEND:\nJP END\n");
    let commented = assemble("# header comment\n\nCLS # trailing comment\n\n# more\nEND:\nJP END\n");

    assert_eq!(plain, commented);
}

#[test]
fn test_error_lines() {
    assert_eq!(parse_error("CLS\nFOO\n").line, 1);
    assert_eq!(parse_error("SHR v16\n").line, 0);
    assert_eq!(parse_error("CLS\nLD v0, 0xGG\n").line, 1);
    assert_eq!(parse_error("LD v0, 0b012\n").line, 0);
    assert_eq!(parse_error("ADD v0, 256\n").line, 0);
    assert_eq!(parse_error("CLS\nCLS\nJP 4096\n").line, 2);
    assert_eq!(parse_error("SE v0\n").line, 0);
    assert_eq!(parse_error("JP MISSING\n").line, 0);
}

#[test]
fn test_error_lines_skip_labels() {
    // Label lines are not part of the instruction stream, so the bad
    // instruction below sits at index 1.
    let error = parse_error("CLS\nHERE:\nLD v0, 0xZZ\n");
    assert_eq!(error.line, 1);
}

#[test]
fn test_rom_round_trip() {
    use tempdir::TempDir;

    let example = "START:\nLD v0, 0x2A\nDRW v0, v1, 5\nJP START\n";
    let assembler = Assembler::from_string(example);
    let cartridge = assembler.assemble_cartridge().unwrap();

    // Save ROM.
    let tmpdir = TempDir::new("test-assembly").unwrap();
    let tmppath = tmpdir.path().join("example.ch8");
    cartridge.save_to_path(&tmppath).unwrap();

    // Reload ROM; saved bytes should match the assembled ones.
    let cartridge2 = Cartridge::load_from_path(&tmppath).unwrap();
    assert_eq!(cartridge2.get_data(), cartridge.get_data());
    assert_eq!(cartridge2.get_data(), &[0x60, 0x2A, 0xD0, 0x15, 0x12, 0x00]);
}
