//! Translated UI messages.
//!
//! A static mapping from [`Language`] to a fixed record of message fields.
//! No runtime interpolation; callers compose messages themselves.

use crate::settings::Language;

/// The fixed set of translated message fields.
#[derive(Debug)]
pub struct Messages {
    pub select_folder: &'static str,
    pub organize: &'static str,
    pub organize_date: &'static str,
    pub browse: &'static str,
    pub preview: &'static str,
    pub undo: &'static str,
    pub add_category: &'static str,
    pub success: &'static str,
    pub undo_success: &'static str,
    pub undo_empty: &'static str,
    pub warning: &'static str,
    pub wrong_password: &'static str,
    pub enter_password: &'static str,
}

static ENGLISH: Messages = Messages {
    select_folder: "Select a folder to organize its files:",
    organize: "Organize Files",
    organize_date: "Organize by Date",
    browse: "Browse",
    preview: "Preview",
    undo: "Undo",
    add_category: "Add Category",
    success: "Files organized successfully!",
    undo_success: "Files restored to original location!",
    undo_empty: "Nothing to undo!",
    warning: "Please select a folder first!",
    wrong_password: "Wrong password!",
    enter_password: "Enter password:",
};

static HINDI: Messages = Messages {
    select_folder: "फ़ोल्डर चुनें:",
    organize: "फ़ाइल व्यवस्थित करें",
    organize_date: "तारीख अनुसार व्यवस्थित करें",
    browse: "ब्राउज़",
    preview: "पूर्वावलोकन",
    undo: "पूर्ववत",
    add_category: "श्रेणी जोड़ें",
    success: "फ़ाइलें सफलतापूर्वक व्यवस्थित हुईं!",
    undo_success: "फ़ाइलें मूल स्थान पर लौटा दी गईं!",
    undo_empty: "पूर्ववत करने के लिए कुछ नहीं!",
    warning: "कृपया पहले फ़ोल्डर चुनें!",
    wrong_password: "गलत पासवर्ड!",
    enter_password: "पासवर्ड दर्ज करें:",
};

static TELUGU: Messages = Messages {
    select_folder: "ఫోల్డర్ ఎంచుకోండి:",
    organize: "ఫైళ్ళను సజావుగా చేయండి",
    organize_date: "తేదీ ప్రకారం సజావుగా చేయండి",
    browse: "బ్రౌజ్",
    preview: "ప్రివ్యూ",
    undo: "అన్‌డూ",
    add_category: "కొత్త వర్గం జోడించండి",
    success: "ఫైళ్ళు విజయవంతంగా సజావుగా చేయబడ్డాయి!",
    undo_success: "ఫైళ్ళు అసలు స్థానానికి పునరుద్ధరించబడ్డాయి!",
    undo_empty: "అన్‌డూ చేయడానికి ఏమీ లేదు!",
    warning: "దయచేసి ముందుగా ఫోల్డర్ ఎంచుకోండి!",
    wrong_password: "తప్పు పాస్‌వర్డ్!",
    enter_password: "పాస్‌వర్డ్ నమోదు చేయండి:",
};

/// Message record for a language.
pub fn messages(language: Language) -> &'static Messages {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
        Language::Telugu => &TELUGU,
    }
}
