use super::{InputSerializer, OutputSerializer, SerializerError, Wire};

impl Wire for bool {
    fn write(&self, out: &mut OutputSerializer) -> Result<(), SerializerError> {
        out.write_u8(u8::from(*self));
        Ok(())
    }

    fn read(input: &mut InputSerializer<'_>) -> Result<Self, SerializerError> {
        match input.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(SerializerError::InvalidBool(byte)),
        }
    }
}

macro_rules! impl_wire_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Wire for $ty {
                fn write(&self, out: &mut OutputSerializer) -> Result<(), SerializerError> {
                    out.write_bytes(&self.to_le_bytes());
                    Ok(())
                }

                fn read(input: &mut InputSerializer<'_>) -> Result<Self, SerializerError> {
                    Ok(<$ty>::from_le_bytes(input.read_array()?))
                }
            }
        )*
    };
}

impl_wire_le!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Wire for String {
    fn write(&self, out: &mut OutputSerializer) -> Result<(), SerializerError> {
        out.write_len(self.len())?;
        out.write_bytes(self.as_bytes());
        Ok(())
    }

    fn read(input: &mut InputSerializer<'_>) -> Result<Self, SerializerError> {
        let len = input.read_len()?;
        let bytes = input.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| SerializerError::InvalidUtf8)
    }
}

impl<T: Wire> Wire for Vec<T> {
    fn write(&self, out: &mut OutputSerializer) -> Result<(), SerializerError> {
        out.write_len(self.len())?;
        for item in self {
            item.write(out)?;
        }
        Ok(())
    }

    fn read(input: &mut InputSerializer<'_>) -> Result<Self, SerializerError> {
        let len = input.read_len()?;
        // Elements take at least one byte each.
        let mut items = Vec::with_capacity(len.min(input.remaining()));
        for _ in 0..len {
            items.push(T::read(input)?);
        }
        Ok(items)
    }
}

impl<T: Wire> Wire for Option<T> {
    fn write(&self, out: &mut OutputSerializer) -> Result<(), SerializerError> {
        self.is_some().write(out)?;
        match self {
            Some(value) => value.write(out),
            None => Ok(()),
        }
    }

    fn read(input: &mut InputSerializer<'_>) -> Result<Self, SerializerError> {
        if bool::read(input)? {
            Ok(Some(T::read(input)?))
        } else {
            Ok(None)
        }
    }
}
