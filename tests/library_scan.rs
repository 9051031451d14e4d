use std::fs;

use shucks::{scan_audio_dir, ClipId, GameError, SongLibrary};
use tempfile::tempdir;

#[test]
fn scanned_clips_group_under_their_titles() {
    let dir = tempdir().unwrap();
    for name in [
        "beaver_creek_1.mp3",
        "beaver_creek_2.MP3",
        "sally_goodin_1.ogg",
        "1812_1.mp3",
        "notes.txt",
        "cover.jpg",
    ] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    fs::create_dir(dir.path().join("nested_1.mp3")).unwrap();

    let entries = scan_audio_dir(dir.path()).unwrap();
    assert_eq!(entries.len(), 3);

    let library = SongLibrary::from_entries(entries).unwrap();
    assert_eq!(library.titles(), ["Beaver Creek", "Sally Goodin"]);
    assert_eq!(library.clip_count(), 3);

    let creek = library.clips_of("Beaver Creek").unwrap();
    assert_eq!(creek.len(), 2);
    let sally = ClipId::new(dir.path().join("sally_goodin_1.ogg"));
    assert_eq!(library.title_of(&sally).unwrap(), "Sally Goodin");
}

#[test]
fn a_directory_without_clips_cannot_start_a_game() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("readme.md"), b"").unwrap();

    let entries = scan_audio_dir(dir.path()).unwrap();
    assert!(entries.is_empty());
    assert!(matches!(
        SongLibrary::from_entries(entries),
        Err(GameError::Library(_))
    ));
}

#[test]
fn a_missing_directory_is_a_library_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does_not_exist");
    assert!(matches!(
        scan_audio_dir(&missing),
        Err(GameError::Library(_))
    ));
}

#[test]
fn clips_without_letters_in_their_title_are_left_out() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("1812_1.mp3"), b"").unwrap();
    fs::write(dir.path().join("1812_2.wav"), b"").unwrap();
    fs::write(dir.path().join("soldiers_joy_1.mp3"), b"").unwrap();

    let entries = scan_audio_dir(dir.path()).unwrap();
    let library = SongLibrary::from_entries(entries).unwrap();
    assert_eq!(library.titles(), ["Soldiers Joy"]);
    assert_eq!(library.clip_count(), 1);
}
