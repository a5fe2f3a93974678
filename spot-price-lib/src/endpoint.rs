use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::{fmt, marker::PhantomData};

pub trait Encode {
    fn encode(message: &Self) -> Result<Bytes, serde_json::Error>;
}

pub trait Decode {
    type Output;
    type DecodeError;

    fn decode<T: AsRef<[u8]>>(payload: T) -> Result<Self::Output, Self::DecodeError>;
}

/// HTTP route that accepts a `Req` body and answers with a `Resp` body.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Endpoint<Req, Resp>(&'static str, PhantomData<(Req, Resp)>);

impl<Req, Resp> Endpoint<Req, Resp>
where
    Req: Encode,
    Resp: Decode,
{
    pub const fn new(path: &'static str) -> Self {
        Self(path, PhantomData {})
    }

    pub fn encode(&self, request: &Req) -> Result<Bytes, serde_json::Error> {
        Req::encode(request)
    }

    pub fn decode<T>(&self, payload: T) -> Result<Resp::Output, Resp::DecodeError>
    where
        T: AsRef<[u8]>,
    {
        Resp::decode(payload)
    }

    pub const fn path(&self) -> &'static str {
        self.0
    }
}

impl<T> Encode for T
where
    T: Serialize,
{
    fn encode(message: &Self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(message).map(Bytes::from)
    }
}

impl<M> Decode for M
where
    M: for<'a> Deserialize<'a>,
{
    type Output = Self;
    type DecodeError = serde_json::Error;

    fn decode<T: AsRef<[u8]>>(payload: T) -> Result<Self::Output, Self::DecodeError> {
        serde_json::from_slice(payload.as_ref())
    }
}

impl<Req, Resp> fmt::Display for Endpoint<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
