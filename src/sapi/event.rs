use std::ffi::c_void;

use windows as Windows;
use Windows::core::IUnknown;
use Windows::Win32::Media::Speech::{
    SPEI_END_INPUT_STREAM, SPEI_START_INPUT_STREAM, SPEI_WORD_BOUNDARY, SPET_LPARAM_IS_OBJECT,
    SPET_LPARAM_IS_POINTER, SPET_LPARAM_IS_STRING, SPET_LPARAM_IS_TOKEN, SPET_LPARAM_IS_UNDEFINED,
    SPEVENT, SPEVENTENUM, SPEVENTLPARAMTYPE,
};
use Windows::Win32::System::Com::CoTaskMemFree;

use crate::Result;

pub(crate) enum SynthEvent {
    StreamStarted(u32),
    StreamFinished(u32),
    WordBoundary {
        stream: u32,
        position: usize,
        length: usize,
    },
    Other,
}

impl SynthEvent {
    pub fn from_sapi(sapi_event: SPEVENT) -> Result<Self> {
        let id = SPEVENTENUM(sapi_event._bitfield & 0xffff);
        let lparam = sapi_event.lParam.0;

        free_lparam(SPEVENTLPARAMTYPE(sapi_event._bitfield >> 16), lparam)?;

        let stream = sapi_event.ulStreamNum;
        Ok(match id {
            SPEI_START_INPUT_STREAM => Self::StreamStarted(stream),
            SPEI_END_INPUT_STREAM => Self::StreamFinished(stream),
            SPEI_WORD_BOUNDARY => Self::WordBoundary {
                stream,
                position: lparam as usize,
                length: sapi_event.wParam.0 as usize,
            },
            _ => Self::Other,
        })
    }
}

// The event owns whatever its lparam points to; word boundaries and stream events carry plain
// numbers.
fn free_lparam(kind: SPEVENTLPARAMTYPE, lparam: isize) -> Result<()> {
    use Windows::core::Abi;

    match kind {
        SPET_LPARAM_IS_OBJECT | SPET_LPARAM_IS_TOKEN => {
            drop(unsafe { IUnknown::from_abi(lparam as _) }?);
        }
        SPET_LPARAM_IS_POINTER | SPET_LPARAM_IS_STRING => unsafe {
            CoTaskMemFree(lparam as *const c_void)
        },
        SPET_LPARAM_IS_UNDEFINED => {}
        _ => panic!("Unrecognized SPEVENTLPARAMTYPE value"),
    }
    Ok(())
}
