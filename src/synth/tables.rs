//! Name and classification tables
//!
//! The transliterated tables are parallel to the Arabic ones, entry for
//! entry, but are indexed independently (see [`super::ordinal`]).

pub const FIRST_NAMES: [&str; 50] = [
    "محمد", "أحمد", "علي", "عمر", "حسن", "حسين", "إبراهيم", "خالد", "محمود", "يوسف", "عبدالله",
    "مصطفى", "بلال", "فيصل", "طارق", "جمال", "نبيل", "رامي", "سمير", "وليد", "زياد", "عدنان",
    "بسام", "فريد", "غازي", "هاني", "عماد", "كريم", "ليث", "ماهر", "ناصر", "قاسم", "راشد", "سامي",
    "تامر", "وائل", "ياسين", "زكي", "أنس", "باسل", "فادي", "جهاد", "عصام", "رضا", "صلاح", "منير",
    "رفيق", "شادي", "هيثم", "أسامة",
];

pub const FATHER_NAMES: [&str; 20] = [
    "محمد", "أحمد", "علي", "عمر", "حسن", "إبراهيم", "خالد", "محمود", "يوسف", "عبدالله", "مصطفى",
    "سعيد", "عبدالرحمن", "عبدالكريم", "صالح", "فهد", "ناصر", "سليمان", "جميل", "كمال",
];

pub const FAMILY_NAMES: [&str; 50] = [
    "الحلبي", "الشامي", "الحايك", "النجار", "الخطيب", "البكري", "العجمي", "الترك", "القدسي",
    "المصري", "الكردي", "الدمشقي", "الحموي", "الحمصي", "اللاذقي", "الإدلبي", "الرقي", "الحسكاوي",
    "الديري", "السوري", "الأسود", "الأبيض", "الأحمر", "جبريل", "شاهين", "قاسم", "سلطان", "أمين",
    "عثمان", "حمدان", "زيدان", "عيسى", "موسى", "داود", "سليم", "حبيب", "رشيد", "سعد", "فرحات",
    "بركات", "عطية", "هاشم", "طه", "ياسين", "شعبان", "رمضان", "العلي", "الحسن", "الموسى", "العمر",
];

pub const FIRST_NAMES_LATIN: [&str; 50] = [
    "Muhammad", "Ahmad", "Ali", "Omar", "Hassan", "Hussein", "Ibrahim", "Khalid", "Mahmoud",
    "Yusuf", "Abdullah", "Mustafa", "Bilal", "Faisal", "Tariq", "Jamal", "Nabil", "Rami", "Samir",
    "Walid", "Ziad", "Adnan", "Bassam", "Farid", "Ghazi", "Hani", "Imad", "Karim", "Laith", "Maher",
    "Nasser", "Qasim", "Rashid", "Sami", "Tamer", "Wael", "Yassin", "Zaki", "Anas", "Basel", "Fadi",
    "Jihad", "Issam", "Rida", "Salah", "Munir", "Rafiq", "Shadi", "Haitham", "Osama",
];

pub const FATHER_NAMES_LATIN: [&str; 20] = [
    "Muhammad", "Ahmad", "Ali", "Omar", "Hassan", "Ibrahim", "Khalid", "Mahmoud", "Yusuf",
    "Abdullah", "Mustafa", "Said", "Abdulrahman", "Abdulkarim", "Saleh", "Fahd", "Nasser",
    "Suleiman", "Jamil", "Kamal",
];

pub const FAMILY_NAMES_LATIN: [&str; 50] = [
    "Al-Halabi", "Al-Shami", "Al-Hayek", "Al-Najjar", "Al-Khatib", "Al-Bakri", "Al-Ajami",
    "Al-Turk", "Al-Qudsi", "Al-Masri", "Al-Kurdi", "Al-Dimashqi", "Al-Hamwi", "Al-Homsi",
    "Al-Lattaki", "Al-Idlibi", "Al-Raqqi", "Al-Hasakawi", "Al-Deiri", "Al-Suri", "Al-Aswad",
    "Al-Abyad", "Al-Ahmar", "Jibreel", "Shaheen", "Qasim", "Sultan", "Amin", "Othman", "Hamdan",
    "Zeidan", "Issa", "Mousa", "Daoud", "Salim", "Habib", "Rashid", "Saad", "Farhat", "Barakat",
    "Atiyeh", "Hashim", "Taha", "Yaseen", "Shaaban", "Ramadan", "Al-Ali", "Al-Hassan", "Al-Mousa",
    "Al-Omar",
];

/// Property classifications as (Arabic label, Turkish label)
pub const PROPERTY_TYPES: [(&str, &str); 6] = [
    ("سكني", "Konut"),
    ("تجاري", "Ticari"),
    ("زراعي", "Tarım"),
    ("صناعي", "Sanayi"),
    ("مختلط", "Karma"),
    ("أرض فارغة", "Arsa"),
];
